// ==========================================
// 周中聚会排程核心 - 自动分派引擎
// ==========================================
// 职责: 在规范化部分上执行贪心分派
// 输入: 待分派部分 + 现有分派 + 排序数据集
// 输出: 新的分派表(输入不被修改)
// ==========================================
// 红线: 不覆盖非空槽位
// 红线: 同一次执行中同一传道员不占用两个槽位(主席标记部分除外)
// 红线: 贪心、不回溯;无合格候选的槽位保持空缺,不视为错误
// ==========================================

use crate::domain::part::{Assignments, PartToAssign, PreAssignment};
use crate::domain::publisher::find_by_name;
use crate::domain::types::SortMode;
use crate::engine::candidate_ranker::{CandidateRanker, RankingPool};
use crate::engine::pairing::PairingValidator;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

// ==========================================
// AutoFillAssigner - 自动分派引擎
// ==========================================
pub struct AutoFillAssigner {
    ranker: CandidateRanker,
}

impl AutoFillAssigner {
    pub fn new() -> Self {
        Self {
            ranker: CandidateRanker::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 自动分派
    ///
    /// # 流程
    /// 1. 预占: 现有分派中的主分派人与助手全部计入已占用
    /// 2. 阶段一: 主席未分派时,取首个未占用的合格候选
    /// 3. 阶段二: 按顺序处理其余部分(跳过主席部分)
    ///    - 主分派: 主席标记 → 阶段一人选;具名预分派 → 按姓名/别名解析;
    ///      已分派 → 计入占用;否则取首个未占用的合格候选
    ///    - 助手: 需要助手、尚未分派且主分派已定时,取首个未占用、
    ///      非主分派本人且通过配对校验的合格候选
    #[instrument(skip_all, fields(parts = parts.len(), week = %pool.week.week_id))]
    pub fn auto_fill(
        &self,
        parts: &[PartToAssign],
        existing: &Assignments,
        pool: &RankingPool<'_>,
    ) -> Assignments {
        let mut result = existing.clone();
        let mut used: HashSet<String> = HashSet::new();

        for state in result.values() {
            if let Some(id) = state.student() {
                used.insert(id.to_string());
            }
            if let Some(id) = state.helper() {
                used.insert(id.to_string());
            }
        }

        // ----- 阶段一: 主席 -----
        let presiding_part = parts.iter().find(|p| p.is_presiding_officer_slot());
        let mut presiding_id: Option<String> = presiding_part
            .and_then(|p| result.get(&p.id))
            .and_then(|s| s.student())
            .map(str::to_string);

        if let Some(part) = presiding_part.filter(|_| presiding_id.is_none()) {
            match self.first_unused_principal(part, pool, &used) {
                Some(id) => {
                    debug!(part_id = %part.id, publisher_id = %id, "主席分派");
                    result.entry(part.id.clone()).or_default().student_id = Some(id.clone());
                    used.insert(id.clone());
                    presiding_id = Some(id);
                }
                None => warn!(part_id = %part.id, "无可用主席候选"),
            }
        }

        // ----- 阶段二: 其余部分 -----
        for part in parts {
            if presiding_part.is_some_and(|p| p.id == part.id) {
                continue;
            }

            let mut student_id: Option<String> = result
                .get(&part.id)
                .and_then(|s| s.student())
                .map(str::to_string);
            let has_helper = result.get(&part.id).and_then(|s| s.helper()).is_some();

            if let Some(id) = &student_id {
                if !part.is_presided() {
                    used.insert(id.clone());
                }
            } else {
                student_id = match &part.pre_assigned_to {
                    Some(PreAssignment::PresidingOfficer) => presiding_id.clone(),
                    Some(PreAssignment::Named(name)) => match find_by_name(pool.publishers, name) {
                        Some(publisher) if used.contains(&publisher.id) => {
                            warn!(part_id = %part.id, name = %name, "预分派人已占用其他槽位,跳过");
                            None
                        }
                        Some(publisher) => {
                            used.insert(publisher.id.clone());
                            Some(publisher.id.clone())
                        }
                        None => {
                            warn!(part_id = %part.id, name = %name, "预分派姓名无法匹配传道员");
                            None
                        }
                    },
                    None => {
                        let picked = self.first_unused_principal(part, pool, &used);
                        if let Some(id) = &picked {
                            used.insert(id.clone());
                        }
                        picked
                    }
                };
                if let Some(id) = &student_id {
                    result.entry(part.id.clone()).or_default().student_id = Some(id.clone());
                }
            }

            if part.requires_helper && !has_helper {
                if let Some(principal_id) = &student_id {
                    if let Some(helper_id) = self.first_valid_helper(part, principal_id, pool, &used) {
                        result.entry(part.id.clone()).or_default().helper_id = Some(helper_id.clone());
                        used.insert(helper_id);
                    }
                }
            }
        }

        let unfilled = parts
            .iter()
            .filter(|p| result.get(&p.id).and_then(|s| s.student()).is_none())
            .count();
        info!(occupied = used.len(), unfilled, "自动分派完成");

        result
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn first_unused_principal(
        &self,
        part: &PartToAssign,
        pool: &RankingPool<'_>,
        used: &HashSet<String>,
    ) -> Option<String> {
        self.ranker
            .rank(part, false, pool, false, SortMode::LastAssigned)
            .into_iter()
            .find(|c| !used.contains(&c.publisher.id))
            .map(|c| c.publisher.id.clone())
    }

    fn first_valid_helper(
        &self,
        part: &PartToAssign,
        principal_id: &str,
        pool: &RankingPool<'_>,
        used: &HashSet<String>,
    ) -> Option<String> {
        let principal = pool.publishers.iter().find(|p| p.id == principal_id);

        self.ranker
            .rank(part, true, pool, false, SortMode::LastAssigned)
            .into_iter()
            .find(|c| {
                if used.contains(&c.publisher.id) || c.publisher.id == principal_id {
                    return false;
                }
                principal.map_or(true, |p| PairingValidator::validate(p, c.publisher).is_valid)
            })
            .map(|c| c.publisher.id.clone())
    }
}

impl Default for AutoFillAssigner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekContext;
    use crate::domain::part::AssignmentState;
    use crate::domain::publisher::{Availability, Privileges, Publisher, SectionEligibility};
    use crate::domain::rule::{Fact, Operator, Rule, RuleCondition};
    use crate::domain::types::{AgeGroup, Condition, Gender, PartType};
    use chrono::NaiveDate;

    fn publisher(id: &str, age_group: AgeGroup) -> Publisher {
        Publisher {
            id: id.to_string(),
            name: format!("Nome {}", id),
            gender: Gender::Brother,
            condition: Condition::Publisher,
            phone: None,
            is_baptized: true,
            is_serving: true,
            age_group,
            parent_ids: vec![],
            is_helper_only: false,
            can_pair_with_non_parent: false,
            privileges: Privileges::default(),
            privileges_by_section: SectionEligibility::default(),
            availability: Availability::default(),
            aliases: vec![],
        }
    }

    fn part(id: &str, title: &str, part_type: PartType) -> PartToAssign {
        PartToAssign {
            id: id.to_string(),
            part_title: title.to_string(),
            part_type,
            duration: Some(3),
            requires_helper: false,
            pre_assigned_to: None,
        }
    }

    fn week() -> WeekContext {
        WeekContext::new("2025-11-03", NaiveDate::from_ymd_opt(2025, 11, 5).unwrap())
    }

    #[test]
    fn test_presiding_officer_bound_to_marked_parts() {
        let pubs = vec![publisher("a", AgeGroup::Adult), publisher("b", AgeGroup::Adult)];
        let mut prayer = part("op", "Oração Inicial", PartType::OpeningPrayer);
        prayer.pre_assigned_to = Some(PreAssignment::PresidingOfficer);
        let parts = vec![part("pres", "Presidente", PartType::PresidingOfficer), prayer];

        let wk = week();
        let pool = RankingPool { publishers: &pubs, history: &[], rules: &[], week: &wk };
        let result = AutoFillAssigner::new().auto_fill(&parts, &Assignments::new(), &pool);

        let pres = result["pres"].student();
        assert!(pres.is_some());
        assert_eq!(result["op"].student(), pres);
    }

    #[test]
    fn test_existing_slots_are_kept_and_reserved() {
        let pubs = vec![publisher("a", AgeGroup::Adult), publisher("b", AgeGroup::Adult)];
        let parts = vec![
            part("t1", "Discurso", PartType::Treasures),
            part("t2", "Joias", PartType::Treasures),
        ];
        let mut existing = Assignments::new();
        existing.insert(
            "t2".to_string(),
            AssignmentState { student_id: Some("a".to_string()), helper_id: None },
        );

        let wk = week();
        let pool = RankingPool { publishers: &pubs, history: &[], rules: &[], week: &wk };
        let result = AutoFillAssigner::new().auto_fill(&parts, &existing, &pool);

        assert_eq!(result["t2"].student(), Some("a"));
        assert_eq!(result["t1"].student(), Some("b"));
        // 输入不被修改
        assert!(existing.get("t1").is_none());
    }

    #[test]
    fn test_named_pre_assignment_uses_alias() {
        let mut carlos = publisher("c", AgeGroup::Adult);
        carlos.name = "Carlos Dias".to_string();
        carlos.aliases = vec!["Carlão".to_string()];
        let pubs = vec![publisher("a", AgeGroup::Adult), carlos];

        let mut talk = part("vc", "Necessidades locais", PartType::ChristianLife);
        talk.pre_assigned_to = Some(PreAssignment::Named("carlao".to_string()));
        let parts = vec![talk, part("t", "Discurso", PartType::Treasures)];

        let wk = week();
        let pool = RankingPool { publishers: &pubs, history: &[], rules: &[], week: &wk };
        let result = AutoFillAssigner::new().auto_fill(&parts, &Assignments::new(), &pool);

        assert_eq!(result["vc"].student(), Some("c"));
        assert_eq!(result["t"].student(), Some("a"));
    }

    #[test]
    fn test_named_pre_assignment_skipped_when_already_presiding() {
        let pubs = vec![publisher("a", AgeGroup::Adult), publisher("b", AgeGroup::Adult)];
        let mut talk = part("vc", "Necessidades locais", PartType::ChristianLife);
        talk.pre_assigned_to = Some(PreAssignment::Named("Nome a".to_string()));
        let parts = vec![part("pres", "Presidente", PartType::PresidingOfficer), talk];

        let mut existing = Assignments::new();
        existing.insert(
            "pres".to_string(),
            AssignmentState { student_id: Some("a".to_string()), helper_id: None },
        );

        let wk = week();
        let pool = RankingPool { publishers: &pubs, history: &[], rules: &[], week: &wk };
        let result = AutoFillAssigner::new().auto_fill(&parts, &existing, &pool);

        assert_eq!(result["pres"].student(), Some("a"));
        // 具名部分保持空缺,不回落到其他候选
        assert!(result.get("vc").and_then(|s| s.student()).is_none());
    }

    #[test]
    fn test_slot_without_candidates_left_empty() {
        let pubs = vec![publisher("a", AgeGroup::Adult)];
        let rules = vec![Rule {
            id: "r".to_string(),
            description: "Ninguém lê".to_string(),
            is_active: true,
            conditions: vec![RuleCondition::new(Fact::PartType, Operator::Equal, "Leitor do EBC")],
        }];
        let parts = vec![part("lr", "Leitor do EBC", PartType::StudyReader)];
        let wk = week();
        let pool = RankingPool { publishers: &pubs, history: &[], rules: &rules, week: &wk };
        let result = AutoFillAssigner::new().auto_fill(&parts, &Assignments::new(), &pool);
        assert!(result.get("lr").is_none());
    }

    #[test]
    fn test_child_helper_must_be_parent() {
        let mut child = publisher("kid", AgeGroup::Child);
        child.parent_ids = vec!["mom".to_string()];
        let pubs = vec![child, publisher("other", AgeGroup::Adult), publisher("mom", AgeGroup::Adult)];

        let mut ministry = part("m", "Iniciando conversas", PartType::Ministry);
        ministry.requires_helper = true;
        let mut existing = Assignments::new();
        existing.insert(
            "m".to_string(),
            AssignmentState { student_id: Some("kid".to_string()), helper_id: None },
        );

        let wk = week();
        let pool = RankingPool { publishers: &pubs, history: &[], rules: &[], week: &wk };
        let result = AutoFillAssigner::new().auto_fill(&[ministry], &existing, &pool);
        assert_eq!(result["m"].helper(), Some("mom"));
    }
}
