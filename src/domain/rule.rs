// ==========================================
// 周中聚会排程核心 - 声明式规则
// ==========================================
// 语义: 规则描述"取消资格"——全部条件成立(AND)即判定不合格
// 规则按列表顺序尝试,首条命中者生效
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub fact: Fact,
    pub operator: Operator,
    pub value: RuleValue,
}

impl RuleCondition {
    pub fn new(fact: Fact, operator: Operator, value: impl Into<RuleValue>) -> Self {
        Self {
            fact,
            operator,
            value: value.into(),
        }
    }
}

// ==========================================
// 比较运算符
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equal,
    NotEqual,
    In,
    NotIn,
    /// 子串包含(忽略大小写)
    Contains,
}

// ==========================================
// 条件取值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<RuleValue>),
}

impl From<bool> for RuleValue {
    fn from(v: bool) -> Self {
        RuleValue::Bool(v)
    }
}

impl From<&str> for RuleValue {
    fn from(v: &str) -> Self {
        RuleValue::Text(v.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(v: String) -> Self {
        RuleValue::Text(v)
    }
}

impl From<Vec<&str>> for RuleValue {
    fn from(v: Vec<&str>) -> Self {
        RuleValue::List(v.into_iter().map(RuleValue::from).collect())
    }
}

// ==========================================
// 事实 (Fact)
// ==========================================
// 显式枚举,未知名称保留为 Unknown(评估时恒为 false)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Fact {
    // 合成事实
    PartType,
    PartTitle,
    IsAvailable,
    // 传道员属性
    Name,
    Gender,
    Condition,
    IsBaptized,
    IsServing,
    AgeGroup,
    IsHelperOnly,
    CanPairWithNonParent,
    // 特权
    CanGiveTalks,
    CanConductStudy,
    CanReadStudy,
    CanPray,
    CanPreside,
    // 分部资格
    CanParticipateInTreasures,
    CanParticipateInMinistry,
    CanParticipateInLife,
    Unknown(String),
}

const FACT_NAMES: [(&str, Fact); 19] = [
    ("partType", Fact::PartType),
    ("partTitle", Fact::PartTitle),
    ("isAvailable", Fact::IsAvailable),
    ("name", Fact::Name),
    ("gender", Fact::Gender),
    ("condition", Fact::Condition),
    ("isBaptized", Fact::IsBaptized),
    ("isServing", Fact::IsServing),
    ("ageGroup", Fact::AgeGroup),
    ("isHelperOnly", Fact::IsHelperOnly),
    ("canPairWithNonParent", Fact::CanPairWithNonParent),
    ("canGiveTalks", Fact::CanGiveTalks),
    ("canConductCBS", Fact::CanConductStudy),
    ("canReadCBS", Fact::CanReadStudy),
    ("canPray", Fact::CanPray),
    ("canPreside", Fact::CanPreside),
    ("canParticipateInTreasures", Fact::CanParticipateInTreasures),
    ("canParticipateInMinistry", Fact::CanParticipateInMinistry),
    ("canParticipateInLife", Fact::CanParticipateInLife),
];

impl Fact {
    /// 规则中使用的技术名称
    pub fn name(&self) -> &str {
        if let Fact::Unknown(raw) = self {
            return raw;
        }
        FACT_NAMES
            .iter()
            .find(|(_, fact)| fact == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        FACT_NAMES
            .iter()
            .find(|(known, _)| *known == trimmed)
            .map(|(_, fact)| fact.clone())
            .unwrap_or_else(|| Fact::Unknown(trimmed.to_string()))
    }
}

impl From<String> for Fact {
    fn from(name: String) -> Self {
        Fact::parse(&name)
    }
}

impl From<Fact> for String {
    fn from(fact: Fact) -> Self {
        fact.name().to_string()
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
