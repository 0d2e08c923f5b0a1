// ==========================================
// 资格判定与候选排序集成测试
// ==========================================
// 职责: 默认规则集 + 规则评估器 + 配对校验 + 候选排序
// ==========================================

mod test_helpers;

use meeting_scheduler::config::default_rules;
use meeting_scheduler::domain::rule::{Fact, Operator, Rule, RuleCondition};
use meeting_scheduler::domain::types::{AgeGroup, Condition, Gender, PartType, SortMode};
use meeting_scheduler::domain::SchedulePart;
use meeting_scheduler::engine::{CandidateRanker, PairingValidator, RankingPool, RuleContext, RuleEvaluator};
use test_helpers::*;

fn ctx<'a>(
    publisher: &'a meeting_scheduler::Publisher,
    part_type: PartType,
    title: &'a str,
) -> RuleContext<'a> {
    RuleContext {
        publisher,
        part_type,
        part_title: title,
        meeting_date: create_week().meeting_date,
    }
}

#[test]
fn test_default_rules_against_congregation() {
    let rules = default_rules();
    let sister = create_publisher("s", "Eva", Gender::Sister, Condition::Publisher);
    let brother = create_publisher("b", "Daniel", Gender::Brother, Condition::Publisher);
    let elder = create_elder("e", "Antônio");

    // 姊妹: 传道部分可以,演讲与宝藏不行
    assert!(RuleEvaluator::evaluate(&ctx(&sister, PartType::Ministry, "Iniciando conversas"), &rules).is_valid);
    let talk = RuleEvaluator::evaluate(&ctx(&sister, PartType::Ministry, "Discurso"), &rules);
    assert!(!talk.is_valid);
    assert_eq!(talk.reason, "Irmãs não podem ser designadas para partes do tipo 'Discurso'.");
    assert!(!RuleEvaluator::evaluate(&ctx(&sister, PartType::Treasures, "Leitura da Bíblia"), &rules).is_valid);

    // 普通弟兄: 宝藏部分仅限读经
    assert!(RuleEvaluator::evaluate(&ctx(&brother, PartType::Treasures, "Leitura da Bíblia"), &rules).is_valid);
    assert!(!RuleEvaluator::evaluate(&ctx(&brother, PartType::Treasures, "Joias espirituais"), &rules).is_valid);

    // 研经主持仅限长老
    assert!(!RuleEvaluator::evaluate(&ctx(&brother, PartType::StudyConductor, "EBC"), &rules).is_valid);
    assert!(RuleEvaluator::evaluate(&ctx(&elder, PartType::StudyConductor, "EBC"), &rules).is_valid);
}

#[test]
fn test_first_matching_rule_wins() {
    let sister = create_publisher("s", "Eva", Gender::Sister, Condition::Publisher);
    let first = Rule {
        id: "a".to_string(),
        description: "Primeira".to_string(),
        is_active: true,
        conditions: vec![RuleCondition::new(Fact::Gender, Operator::Equal, "sister")],
    };
    let second = Rule {
        id: "b".to_string(),
        description: "Segunda".to_string(),
        is_active: true,
        conditions: vec![RuleCondition::new(Fact::PartType, Operator::Equal, "Nossa Vida Cristã")],
    };

    let c = ctx(&sister, PartType::ChristianLife, "Necessidades locais");
    let outcome = RuleEvaluator::evaluate(&c, &[first.clone(), second.clone()]);
    assert_eq!(outcome.reason, "Primeira");
    let outcome = RuleEvaluator::evaluate(&c, &[second, first]);
    assert_eq!(outcome.reason, "Segunda");
}

#[test]
fn test_child_without_parents_has_no_valid_helper() {
    let mut child = create_publisher("kid", "Lucas", Gender::Brother, Condition::Publisher);
    child.age_group = AgeGroup::Child;

    let pool: Vec<_> = (0..20)
        .map(|i| create_publisher(&format!("a{}", i), &format!("Adulto {}", i), Gender::Brother, Condition::Publisher))
        .collect();
    assert!(pool.iter().all(|h| !PairingValidator::validate(&child, h).is_valid));

    child.parent_ids = vec!["a7".to_string()];
    assert!(PairingValidator::validate(&child, &pool[7]).is_valid);
    assert!(!PairingValidator::validate(&child, &pool[8]).is_valid);

    child.can_pair_with_non_parent = true;
    assert!(PairingValidator::validate(&child, &pool[8]).is_valid);
}

#[test]
fn test_ranking_prefers_least_recent_of_same_type() {
    let publishers = vec![
        create_publisher("r", "Recente", Gender::Brother, Condition::Publisher),
        create_publisher("o", "Antigo", Gender::Brother, Condition::Publisher),
        create_publisher("n", "Nunca", Gender::Brother, Condition::Publisher),
    ];
    let history = vec![
        create_participation("Recente", PartType::Ministry, "Iniciando conversas", (2025, 10, 22)),
        create_participation("Antigo", PartType::Ministry, "Iniciando conversas", (2025, 6, 4)),
        // 其他类型的分派不影响排序
        create_participation("Nunca", PartType::Treasures, "Leitura da Bíblia", (2025, 10, 29)),
    ];
    let week = create_week();
    let pool = RankingPool {
        publishers: &publishers,
        history: &history,
        rules: &[],
        week: &week,
    };
    let part = SchedulePart::new("Cultivando o interesse", PartType::Ministry, 4).into_part_to_assign(0);

    let ranked = CandidateRanker::new().rank(&part, false, &pool, true, SortMode::LastAssigned);
    let order: Vec<&str> = ranked.iter().map(|c| c.publisher.id.as_str()).collect();
    assert_eq!(order, vec!["n", "o", "r"]);
    assert_eq!(ranked[0].last_assigned, 0);

    let by_name = CandidateRanker::new().rank(&part, false, &pool, true, SortMode::Name);
    let order: Vec<&str> = by_name.iter().map(|c| c.publisher.name.as_str()).collect();
    assert_eq!(order, vec!["Antigo", "Nunca", "Recente"]);
}

#[test]
fn test_ranking_drops_or_demotes_ineligible() {
    let mut inactive = create_publisher("i", "Inativo", Gender::Brother, Condition::Publisher);
    inactive.is_serving = false;
    let publishers = vec![inactive, create_publisher("a", "Ativo", Gender::Brother, Condition::Publisher)];
    let week = create_week();
    let pool = RankingPool {
        publishers: &publishers,
        history: &[],
        rules: &[],
        week: &week,
    };
    let part = SchedulePart::new("Leitura da Bíblia", PartType::Treasures, 4).into_part_to_assign(0);

    let all = CandidateRanker::new().rank(&part, false, &pool, true, SortMode::LastAssigned);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].publisher.id, "a");
    assert_eq!(all[1].reason, "Não Atuante");

    let eligible = CandidateRanker::new().rank(&part, false, &pool, false, SortMode::LastAssigned);
    assert_eq!(eligible.len(), 1);
}
