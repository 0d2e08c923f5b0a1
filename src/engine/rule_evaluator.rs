// ==========================================
// 周中聚会排程核心 - 规则评估器
// ==========================================
// 职责: 按声明式规则判定"传道员 × 部分 × 日期"是否被取消资格
// 语义: 规则内条件为 AND;规则按列表顺序尝试,首条命中即返回不合格
// 红线: 未知事实使其条件恒为 false,不报错
// 红线: 无状态、无副作用、无 I/O
// ==========================================

use crate::domain::publisher::Publisher;
use crate::domain::rule::{Fact, Operator, Rule, RuleCondition, RuleValue};
use crate::domain::types::PartType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// 全部规则通过时的说明
pub const ALL_RULES_PASSED: &str = "Todas as regras foram atendidas.";

// ==========================================
// 评估上下文
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub publisher: &'a Publisher,
    pub part_type: PartType,
    pub part_title: &'a str,
    pub meeting_date: NaiveDate,
}

/// 评估结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub reason: String,
}

impl ValidationOutcome {
    pub fn valid(reason: &str) -> Self {
        Self {
            is_valid: true,
            reason: reason.to_string(),
        }
    }

    pub fn invalid(reason: &str) -> Self {
        Self {
            is_valid: false,
            reason: reason.to_string(),
        }
    }
}

/// 事实取值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactValue {
    Bool(bool),
    Text(String),
}

type FactExtractor = fn(&RuleContext<'_>) -> FactValue;

fn text(value: &str) -> FactValue {
    FactValue::Text(value.to_string())
}

/// 事实 → 取值函数;Unknown 没有取值函数
fn extractor(fact: &Fact) -> Option<FactExtractor> {
    let f: FactExtractor = match fact {
        Fact::PartType => |c| text(c.part_type.label()),
        Fact::PartTitle => |c| text(c.part_title),
        Fact::IsAvailable => |c| FactValue::Bool(c.publisher.is_available_on(c.meeting_date)),
        Fact::Name => |c| text(&c.publisher.name),
        Fact::Gender => |c| text(c.publisher.gender.label()),
        Fact::Condition => |c| text(c.publisher.condition.label()),
        Fact::IsBaptized => |c| FactValue::Bool(c.publisher.is_baptized),
        Fact::IsServing => |c| FactValue::Bool(c.publisher.is_serving),
        Fact::AgeGroup => |c| text(c.publisher.age_group.label()),
        Fact::IsHelperOnly => |c| FactValue::Bool(c.publisher.is_helper_only),
        Fact::CanPairWithNonParent => |c| FactValue::Bool(c.publisher.can_pair_with_non_parent),
        Fact::CanGiveTalks => |c| FactValue::Bool(c.publisher.privileges.can_give_talks),
        Fact::CanConductStudy => |c| FactValue::Bool(c.publisher.privileges.can_conduct_study),
        Fact::CanReadStudy => |c| FactValue::Bool(c.publisher.privileges.can_read_study),
        Fact::CanPray => |c| FactValue::Bool(c.publisher.privileges.can_pray),
        Fact::CanPreside => |c| FactValue::Bool(c.publisher.privileges.can_preside),
        Fact::CanParticipateInTreasures => {
            |c| FactValue::Bool(c.publisher.privileges_by_section.can_participate_in_treasures)
        }
        Fact::CanParticipateInMinistry => {
            |c| FactValue::Bool(c.publisher.privileges_by_section.can_participate_in_ministry)
        }
        Fact::CanParticipateInLife => {
            |c| FactValue::Bool(c.publisher.privileges_by_section.can_participate_in_life)
        }
        Fact::Unknown(_) => return None,
    };
    Some(f)
}

/// 严格相等: 类型不同即不相等
fn value_equals(fact: &FactValue, value: &RuleValue) -> bool {
    match (fact, value) {
        (FactValue::Bool(a), RuleValue::Bool(b)) => a == b,
        (FactValue::Text(a), RuleValue::Text(b)) => a == b,
        _ => false,
    }
}

// ==========================================
// RuleEvaluator - 纯函数工具类
// ==========================================
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// 评估全部有效规则
    ///
    /// # 返回
    /// - 首条全部条件成立的规则 → 不合格,原因为该规则描述
    /// - 无规则命中 → 合格
    pub fn evaluate(ctx: &RuleContext<'_>, rules: &[Rule]) -> ValidationOutcome {
        for rule in rules.iter().filter(|r| r.is_active) {
            if Self::rule_fires(ctx, rule) {
                trace!(
                    publisher = %ctx.publisher.name,
                    part_type = %ctx.part_type,
                    rule_id = %rule.id,
                    "规则命中"
                );
                return ValidationOutcome::invalid(&rule.description);
            }
        }
        ValidationOutcome::valid(ALL_RULES_PASSED)
    }

    /// 规则是否命中(条件全部成立,短路)
    ///
    /// 无条件的规则恒命中
    pub fn rule_fires(ctx: &RuleContext<'_>, rule: &Rule) -> bool {
        rule.conditions
            .iter()
            .all(|condition| Self::check_condition(ctx, condition))
    }

    /// 单条件判定
    pub fn check_condition(ctx: &RuleContext<'_>, condition: &RuleCondition) -> bool {
        let Some(extract) = extractor(&condition.fact) else {
            return false;
        };
        let fact_value = extract(ctx);

        match condition.operator {
            Operator::Equal => value_equals(&fact_value, &condition.value),
            Operator::NotEqual => !value_equals(&fact_value, &condition.value),
            Operator::In => match &condition.value {
                RuleValue::List(items) => items.iter().any(|v| value_equals(&fact_value, v)),
                _ => false,
            },
            Operator::NotIn => match &condition.value {
                RuleValue::List(items) => !items.iter().any(|v| value_equals(&fact_value, v)),
                _ => false,
            },
            Operator::Contains => match (&fact_value, &condition.value) {
                (FactValue::Text(haystack), RuleValue::Text(needle)) => haystack
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                _ => false,
            },
        }
    }

    /// 与指定部分类型相关的有效规则
    ///
    /// # 规则
    /// - 无 partType 条件 → 相关
    /// - 存在 partType 条件以 equal/in 指向该类型 → 相关
    pub fn relevant_rules(part_type: PartType, rules: &[Rule]) -> Vec<&Rule> {
        let label = RuleValue::Text(part_type.label().to_string());
        rules
            .iter()
            .filter(|rule| rule.is_active)
            .filter(|rule| {
                let type_conditions: Vec<&RuleCondition> = rule
                    .conditions
                    .iter()
                    .filter(|c| c.fact == Fact::PartType)
                    .collect();
                if type_conditions.is_empty() {
                    return true;
                }
                type_conditions.iter().any(|c| match (c.operator, &c.value) {
                    (Operator::Equal, v) => *v == label,
                    (Operator::In, RuleValue::List(items)) => items.contains(&label),
                    _ => false,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::publisher::{Availability, Privileges, SectionEligibility};
    use crate::domain::types::{AgeGroup, AvailabilityMode, Condition, Gender};

    fn sister() -> Publisher {
        Publisher {
            id: "s1".to_string(),
            name: "Maria".to_string(),
            gender: Gender::Sister,
            condition: Condition::Publisher,
            phone: None,
            is_baptized: true,
            is_serving: true,
            age_group: AgeGroup::Adult,
            parent_ids: vec![],
            is_helper_only: false,
            can_pair_with_non_parent: false,
            privileges: Privileges::default(),
            privileges_by_section: SectionEligibility::default(),
            availability: Availability::default(),
            aliases: vec![],
        }
    }

    fn rule(id: &str, conditions: Vec<RuleCondition>) -> Rule {
        Rule {
            id: id.to_string(),
            description: format!("regra {}", id),
            is_active: true,
            conditions,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 5).unwrap()
    }

    fn ctx<'a>(p: &'a Publisher, part_type: PartType, title: &'a str) -> RuleContext<'a> {
        RuleContext {
            publisher: p,
            part_type,
            part_title: title,
            meeting_date: date(),
        }
    }

    // ==========================================
    // 测试 1: 基本命中与放行
    // ==========================================

    #[test]
    fn test_no_rules_is_valid() {
        let p = sister();
        let outcome = RuleEvaluator::evaluate(&ctx(&p, PartType::Ministry, "Iniciando conversas"), &[]);
        assert!(outcome.is_valid);
        assert_eq!(outcome.reason, ALL_RULES_PASSED);
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let p = sister();
        let rules = vec![rule(
            "talk",
            vec![
                RuleCondition::new(Fact::Gender, Operator::Equal, "sister"),
                RuleCondition::new(Fact::PartTitle, Operator::Contains, "discurso"),
            ],
        )];

        let blocked = RuleEvaluator::evaluate(&ctx(&p, PartType::Ministry, "5. Discurso"), &rules);
        assert!(!blocked.is_valid);
        assert_eq!(blocked.reason, "regra talk");

        let allowed = RuleEvaluator::evaluate(&ctx(&p, PartType::Ministry, "Cultivando o interesse"), &rules);
        assert!(allowed.is_valid);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let p = sister();
        let rules = vec![
            rule("a", vec![RuleCondition::new(Fact::Gender, Operator::Equal, "sister")]),
            rule("b", vec![RuleCondition::new(Fact::IsBaptized, Operator::Equal, true)]),
        ];
        let outcome = RuleEvaluator::evaluate(&ctx(&p, PartType::Treasures, "Joias"), &rules);
        assert_eq!(outcome.reason, "regra a");

        let reversed: Vec<Rule> = rules.into_iter().rev().collect();
        let outcome = RuleEvaluator::evaluate(&ctx(&p, PartType::Treasures, "Joias"), &reversed);
        assert_eq!(outcome.reason, "regra b");
    }

    #[test]
    fn test_inactive_rules_are_skipped() {
        let p = sister();
        let mut r = rule("x", vec![RuleCondition::new(Fact::Gender, Operator::Equal, "sister")]);
        r.is_active = false;
        assert!(RuleEvaluator::evaluate(&ctx(&p, PartType::Ministry, "t"), &[r]).is_valid);
    }

    // ==========================================
    // 测试 2: 运算符
    // ==========================================

    #[test]
    fn test_member_of_operators() {
        let p = sister();
        let in_list = RuleCondition::new(
            Fact::PartType,
            Operator::In,
            vec!["Oração Inicial", "Oração Final"],
        );
        assert!(RuleEvaluator::check_condition(&ctx(&p, PartType::ClosingPrayer, "Oração Final"), &in_list));
        assert!(!RuleEvaluator::check_condition(&ctx(&p, PartType::Ministry, "x"), &in_list));

        let not_in = RuleCondition::new(
            Fact::PartType,
            Operator::NotIn,
            vec!["Faça Seu Melhor no Ministério", "Ajudante"],
        );
        assert!(RuleEvaluator::check_condition(&ctx(&p, PartType::Treasures, "x"), &not_in));
        assert!(!RuleEvaluator::check_condition(&ctx(&p, PartType::Helper, "Ajudante"), &not_in));

        // 非列表值 → false
        let bad = RuleCondition::new(Fact::PartType, Operator::In, "Ajudante");
        assert!(!RuleEvaluator::check_condition(&ctx(&p, PartType::Helper, "Ajudante"), &bad));
    }

    #[test]
    fn test_not_equal_type_mismatch_is_true() {
        let p = sister();
        let c = RuleCondition::new(Fact::IsBaptized, Operator::NotEqual, "true");
        assert!(RuleEvaluator::check_condition(&ctx(&p, PartType::Ministry, "x"), &c));
    }

    #[test]
    fn test_contains_requires_text() {
        let p = sister();
        let c = RuleCondition::new(Fact::IsServing, Operator::Contains, "tru");
        assert!(!RuleEvaluator::check_condition(&ctx(&p, PartType::Ministry, "x"), &c));
    }

    // ==========================================
    // 测试 3: 事实
    // ==========================================

    #[test]
    fn test_unknown_fact_never_matches() {
        let p = sister();
        let rules = vec![rule(
            "u",
            vec![RuleCondition::new(Fact::parse("shoeSize"), Operator::NotEqual, "42")],
        )];
        assert!(RuleEvaluator::evaluate(&ctx(&p, PartType::Ministry, "x"), &rules).is_valid);

        // 传道员的其他字段(id、电话)不在事实字典内
        let by_id = vec![rule("i", vec![RuleCondition::new(Fact::parse("id"), Operator::Equal, p.id.as_str())])];
        assert_eq!(by_id[0].conditions[0].fact, Fact::Unknown("id".to_string()));
        assert!(RuleEvaluator::evaluate(&ctx(&p, PartType::Ministry, "x"), &by_id).is_valid);
    }

    #[test]
    fn test_is_available_fact_uses_meeting_date() {
        let mut p = sister();
        p.availability = Availability {
            mode: AvailabilityMode::DefaultAvailable,
            exception_dates: vec![date()],
        };
        let rules = vec![rule(
            "avail",
            vec![RuleCondition::new(Fact::IsAvailable, Operator::Equal, false)],
        )];
        assert!(!RuleEvaluator::evaluate(&ctx(&p, PartType::Ministry, "x"), &rules).is_valid);

        p.availability.mode = AvailabilityMode::DefaultUnavailable;
        assert!(RuleEvaluator::evaluate(&ctx(&p, PartType::Ministry, "x"), &rules).is_valid);
    }

    #[test]
    fn test_nested_privilege_fact() {
        let mut p = sister();
        p.privileges.can_preside = false;
        let rules = vec![rule(
            "preside",
            vec![
                RuleCondition::new(Fact::PartType, Operator::Equal, "Presidente"),
                RuleCondition::new(Fact::CanPreside, Operator::Equal, false),
            ],
        )];
        assert!(!RuleEvaluator::evaluate(&ctx(&p, PartType::PresidingOfficer, "Presidente"), &rules).is_valid);
        p.privileges.can_preside = true;
        assert!(RuleEvaluator::evaluate(&ctx(&p, PartType::PresidingOfficer, "Presidente"), &rules).is_valid);
    }

    #[test]
    fn test_relevant_rules() {
        let rules = vec![
            rule("generic", vec![RuleCondition::new(Fact::IsServing, Operator::Equal, false)]),
            rule("reader", vec![RuleCondition::new(Fact::PartType, Operator::Equal, "Leitor do EBC")]),
            rule(
                "prayer",
                vec![RuleCondition::new(
                    Fact::PartType,
                    Operator::In,
                    vec!["Oração Inicial", "Oração Final"],
                )],
            ),
        ];
        let ids: Vec<&str> = RuleEvaluator::relevant_rules(PartType::ClosingPrayer, &rules)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["generic", "prayer"]);
    }
}
