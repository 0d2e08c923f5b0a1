// ==========================================
// 周中聚会排程核心 - 候选排序引擎
// ==========================================
// 职责: 为某一部分(主分派或助手槽位)给出有序候选列表
// 输入: 部分 + 传道员 + 历史 + 规则 + 周上下文
// 输出: [{传道员, 是否合格, 原因, 最近同类分派时间}]
// ==========================================
// 排序键(默认模式):
// 1) 合格优先
// 2) 传道/助手部分: 基础层级(非任命)优先
// 3) 最近同类分派时间升序,从未分派(0)最先
// ==========================================

use crate::calendar::WeekContext;
use crate::domain::part::PartToAssign;
use crate::domain::participation::Participation;
use crate::domain::publisher::{normalize_name, Publisher};
use crate::domain::rule::Rule;
use crate::domain::types::{titles, PartType, SortMode};
use crate::engine::rule_evaluator::{RuleContext, RuleEvaluator};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

pub const REASON_NOT_SERVING: &str = "Não Atuante";

/// 排序所需的只读数据集
#[derive(Debug, Clone, Copy)]
pub struct RankingPool<'a> {
    pub publishers: &'a [Publisher],
    pub history: &'a [Participation],
    pub rules: &'a [Rule],
    pub week: &'a WeekContext,
}

/// 排序结果条目
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate<'a> {
    pub publisher: &'a Publisher,
    pub is_valid: bool,
    pub reason: String,
    /// 最近同类分派时间戳(毫秒),从未分派为 0
    pub last_assigned: i64,
}

// ==========================================
// CandidateRanker - 候选排序引擎
// ==========================================
pub struct CandidateRanker {
    // 无状态引擎
}

impl CandidateRanker {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 排序候选人
    ///
    /// # 参数
    /// - `part`: 目标部分
    /// - `is_helper_role`: 是否为该部分的助手槽位(按 "Ajudante" 类型/标题评估)
    /// - `pool`: 传道员、历史、规则与周上下文
    /// - `include_ineligible`: false 时直接剔除不合格者
    /// - `sort_mode`: 排序模式
    pub fn rank<'a>(
        &self,
        part: &PartToAssign,
        is_helper_role: bool,
        pool: &RankingPool<'a>,
        include_ineligible: bool,
        sort_mode: SortMode,
    ) -> Vec<RankedCandidate<'a>> {
        let (target_type, target_title) = if is_helper_role {
            (PartType::Helper, titles::HELPER)
        } else {
            (part.part_type, part.part_title.as_str())
        };

        // 预先归一化历史姓名,避免每位候选人重复计算
        let same_type_history: Vec<(String, i64)> = pool
            .history
            .iter()
            .filter(|h| h.part_type == target_type)
            .map(|h| (normalize_name(&h.publisher_name), h.timestamp_millis()))
            .collect();

        let mut candidates: Vec<RankedCandidate<'a>> = pool
            .publishers
            .iter()
            .map(|publisher| {
                let last_assigned = Self::last_assigned(publisher, &same_type_history);

                if !publisher.is_serving {
                    return RankedCandidate {
                        publisher,
                        is_valid: false,
                        reason: REASON_NOT_SERVING.to_string(),
                        last_assigned,
                    };
                }

                let ctx = RuleContext {
                    publisher,
                    part_type: target_type,
                    part_title: target_title,
                    meeting_date: pool.week.meeting_date,
                };
                let outcome = RuleEvaluator::evaluate(&ctx, pool.rules);
                RankedCandidate {
                    publisher,
                    is_valid: outcome.is_valid,
                    reason: outcome.reason,
                    last_assigned,
                }
            })
            .collect();

        match sort_mode {
            SortMode::Name => candidates.sort_by(|a, b| Self::compare_names(a, b)),
            SortMode::LastAssigned => {
                let prefer_base_tier =
                    matches!(target_type, PartType::Ministry | PartType::Helper);
                candidates.sort_by(|a, b| Self::compare(a, b, prefer_base_tier));
            }
        }

        if !include_ineligible {
            candidates.retain(|c| c.is_valid);
        }

        debug!(
            part_id = %part.id,
            target_type = %target_type,
            is_helper_role,
            candidates = candidates.len(),
            "候选排序完成"
        );

        candidates
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 同类部分的最近分派时间(姓名或别名匹配)
    fn last_assigned(publisher: &Publisher, history: &[(String, i64)]) -> i64 {
        let mut names: Vec<String> = Vec::with_capacity(publisher.aliases.len() + 1);
        names.push(normalize_name(&publisher.name));
        names.extend(publisher.aliases.iter().map(|a| normalize_name(a)));
        names.retain(|n| !n.is_empty());

        history
            .iter()
            .filter(|(name, _)| names.contains(name))
            .map(|(_, ts)| *ts)
            .max()
            .unwrap_or(0)
    }

    fn compare_names(a: &RankedCandidate<'_>, b: &RankedCandidate<'_>) -> Ordering {
        normalize_name(&a.publisher.name)
            .cmp(&normalize_name(&b.publisher.name))
            .then_with(|| a.publisher.name.cmp(&b.publisher.name))
    }

    fn compare(a: &RankedCandidate<'_>, b: &RankedCandidate<'_>, prefer_base_tier: bool) -> Ordering {
        // 1. 合格优先
        if a.is_valid != b.is_valid {
            return if a.is_valid { Ordering::Less } else { Ordering::Greater };
        }

        // 2. 基础层级优先
        if prefer_base_tier {
            let a_base = a.publisher.condition.is_base_tier();
            let b_base = b.publisher.condition.is_base_tier();
            if a_base != b_base {
                return if a_base { Ordering::Less } else { Ordering::Greater };
            }
        }

        // 3. 从未分派最先,其余按时间升序
        match (a.last_assigned == 0, b.last_assigned == 0) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.last_assigned.cmp(&b.last_assigned),
        }
    }
}

impl Default for CandidateRanker {
    fn default() -> Self {
        Self::new()
    }
}
