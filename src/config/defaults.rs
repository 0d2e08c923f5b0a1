// ==========================================
// 周中聚会排程核心 - 初始数据
// ==========================================
// 职责: 新会众的默认规则集与默认活动模板
// 说明: 规则按列表顺序评估,首条命中生效,顺序即优先级
// ==========================================

use crate::domain::event::{EventDefaults, EventImpact, EventTemplate, TargetTypes};
use crate::domain::rule::{Rule, RuleCondition};
use crate::domain::types::{Condition, PartType};

fn rule(id: &str, description: &str, conditions: Vec<RuleCondition>) -> Rule {
    Rule {
        id: id.to_string(),
        description: description.to_string(),
        is_active: true,
        conditions,
    }
}

/// 默认取消资格规则
pub fn default_rules() -> Vec<Rule> {
    use crate::domain::rule::Fact as F;
    use crate::domain::rule::Operator as Op;

    vec![
        rule(
            "rule-not-serving",
            "Não designar publicadores que não estão atuantes.",
            vec![RuleCondition::new(F::IsServing, Op::Equal, false)],
        ),
        rule(
            "rule-unavailable",
            "Não designar publicadores em datas em que não estão disponíveis.",
            vec![RuleCondition::new(F::IsAvailable, Op::Equal, false)],
        ),
        rule(
            "rule-helper-only",
            "Publicadores marcados como 'Só Ajudante' não podem receber partes principais.",
            vec![
                RuleCondition::new(F::IsHelperOnly, Op::Equal, true),
                RuleCondition::new(F::PartType, Op::NotEqual, PartType::Helper.label()),
            ],
        ),
        rule(
            "rule-preside",
            "Apenas irmãos com a caixa \"Pode Presidir\" marcada no cadastro podem ser Presidentes.",
            vec![
                RuleCondition::new(F::PartType, Op::Equal, PartType::PresidingOfficer.label()),
                RuleCondition::new(F::CanPreside, Op::Equal, false),
            ],
        ),
        rule(
            "rule-study-conductor",
            "Apenas anciãos podem dirigir o Estudo Bíblico de Congregação.",
            vec![
                RuleCondition::new(F::PartType, Op::Equal, PartType::StudyConductor.label()),
                RuleCondition::new(F::Condition, Op::NotEqual, Condition::Elder.label()),
            ],
        ),
        rule(
            "rule-prayer-baptized",
            "Apenas irmãos batizados podem fazer a oração.",
            vec![
                RuleCondition::new(
                    F::PartType,
                    Op::In,
                    vec![PartType::OpeningPrayer.label(), PartType::ClosingPrayer.label()],
                ),
                RuleCondition::new(F::IsBaptized, Op::Equal, false),
            ],
        ),
        rule(
            "rule-opening-prayer",
            "Apenas irmãos que podem presidir podem fazer a oração inicial.",
            vec![
                RuleCondition::new(F::PartType, Op::Equal, PartType::OpeningPrayer.label()),
                RuleCondition::new(F::CanPreside, Op::Equal, false),
            ],
        ),
        rule(
            "rule-study-reader",
            "Apenas irmãos podem ser Leitores do Estudo Bíblico.",
            vec![
                RuleCondition::new(F::PartType, Op::Equal, PartType::StudyReader.label()),
                RuleCondition::new(F::Gender, Op::Equal, "sister"),
            ],
        ),
        rule(
            "rule-sister-discourse",
            "Irmãs não podem ser designadas para partes do tipo 'Discurso'.",
            vec![
                RuleCondition::new(F::Gender, Op::Equal, "sister"),
                RuleCondition::new(F::PartTitle, Op::Contains, "Discurso"),
            ],
        ),
        rule(
            "rule-sister-sections",
            "Irmãs só podem ser designadas para partes na seção 'Faça Seu Melhor no Ministério' ou como Ajudante.",
            vec![
                RuleCondition::new(F::Gender, Op::Equal, "sister"),
                RuleCondition::new(
                    F::PartType,
                    Op::NotIn,
                    vec![PartType::Ministry.label(), PartType::Helper.label()],
                ),
            ],
        ),
        rule(
            "rule-treasures-reading",
            "Irmãos (não A/SM) podem participar em 'Tesouros' apenas na 'Leitura da Bíblia'.",
            vec![
                RuleCondition::new(
                    F::Condition,
                    Op::NotIn,
                    vec![Condition::Elder.label(), Condition::MinisterialServant.label()],
                ),
                RuleCondition::new(F::PartType, Op::Equal, PartType::Treasures.label()),
                RuleCondition::new(F::PartTitle, Op::NotEqual, "Leitura da Bíblia"),
            ],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    name: &str,
    description: &str,
    impact: EventImpact,
    duration: i32,
    theme: Option<&str>,
    requires_theme: bool,
    requires_assignee: bool,
) -> EventTemplate {
    EventTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        impact,
        defaults: EventDefaults {
            duration,
            theme: theme.map(str::to_string),
            requires_theme,
            requires_assignee,
        },
    }
}

/// 默认活动模板
pub fn default_event_templates() -> Vec<EventTemplate> {
    vec![
        template(
            "tpl_visita_sc",
            "Visita do superintendente de circuito",
            "A parte do Estudo Bíblico de Congregação é substituída por um discurso de serviço. Os Comentários Finais são designados ao superintendente.",
            EventImpact::ReplacePart {
                target_type: TargetTypes::One(PartType::StudyConductor),
            },
            30,
            None,
            true,
            true,
        ),
        template(
            "tpl_memorial",
            "Memorial da morte de Cristo (Março/Abril)",
            "A reunião do meio de semana é substituída pela celebração do Memorial.",
            EventImpact::ReplaceSection {
                target_type: TargetTypes::Many(vec![
                    PartType::Treasures,
                    PartType::Ministry,
                    PartType::ChristianLife,
                    PartType::StudyConductor,
                    PartType::StudyReader,
                ]),
            },
            45,
            Some("Celebração Anual da Morte de Cristo"),
            false,
            true,
        ),
        template(
            "tpl_boletim_cg",
            "Boletins do corpo governante",
            "Um vídeo do Boletim do Corpo Governante é adicionado como nova parte.",
            EventImpact::AddPart,
            10,
            Some("Boletim do Corpo Governante"),
            false,
            false,
        ),
        template(
            "tpl_assembleia_visao_geral",
            "Assembleia de circuito VISÃO GERAL DO PROGRAMA",
            "Na semana que antecede a assembleia, o presidente destaca o tema e os discursos principais.",
            EventImpact::ReplacePart {
                target_type: TargetTypes::One(PartType::ChristianLife),
            },
            10,
            Some("Visão Geral do Programa da Assembleia"),
            false,
            false,
        ),
        template(
            "tpl_assembleia_recap",
            "Assembleia de circuito RECAPITULAÇÃO DO PROGRAMA",
            "Recapitulação de 15 minutos do programa da assembleia. Requer ajuste de tempo em outra parte.",
            EventImpact::AddPart,
            15,
            Some("Recapitulação do Programa da Assembleia"),
            false,
            true,
        ),
        template(
            "tpl_congresso_lembretes",
            "LEMBRETES DO CONGRESSO",
            "Parte de 15 minutos com lembretes para o congresso. Requer ajuste de tempo em outra parte.",
            EventImpact::AddPart,
            15,
            Some("Lembretes Para o Congresso"),
            false,
            true,
        ),
        template(
            "tpl_congresso_recap",
            "RECAPITULAÇÃO DO PROGRAMA DO CONGRESSO",
            "Recapitulação de 15 minutos do programa do congresso. Requer ajuste de tempo em outra parte.",
            EventImpact::AddPart,
            15,
            Some("Recapitulação do Programa do Congresso"),
            false,
            true,
        ),
    ]
}
