// ==========================================
// 周中聚会排程核心 - 传道员实体
// ==========================================
// 职责: 传道员主数据、特权、可用性
// 说明: 由外部编辑维护,其余模块按 id 引用;历史记录按姓名引用
// ==========================================

use crate::domain::types::{AgeGroup, AvailabilityMode, Condition, Gender};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Publisher - 传道员
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub condition: Condition,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_baptized: bool,
    #[serde(default = "default_true")]
    pub is_serving: bool,
    #[serde(default = "default_age_group")]
    pub age_group: AgeGroup,
    /// 父母 id(最多两个,弱引用)
    #[serde(default)]
    pub parent_ids: Vec<String>,
    #[serde(default)]
    pub is_helper_only: bool,
    #[serde(default)]
    pub can_pair_with_non_parent: bool,
    #[serde(default)]
    pub privileges: Privileges,
    #[serde(default)]
    pub privileges_by_section: SectionEligibility,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_age_group() -> AgeGroup {
    AgeGroup::Adult
}

/// 个人特权
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Privileges {
    pub can_give_talks: bool,
    #[serde(rename = "canConductCBS")]
    pub can_conduct_study: bool,
    #[serde(rename = "canReadCBS")]
    pub can_read_study: bool,
    pub can_pray: bool,
    pub can_preside: bool,
}

/// 按聚会部分的参与资格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionEligibility {
    pub can_participate_in_treasures: bool,
    pub can_participate_in_ministry: bool,
    pub can_participate_in_life: bool,
}

impl Default for SectionEligibility {
    fn default() -> Self {
        Self {
            can_participate_in_treasures: true,
            can_participate_in_ministry: true,
            can_participate_in_life: true,
        }
    }
}

/// 可用性: 模式 + 例外日期
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub mode: AvailabilityMode,
    #[serde(default)]
    pub exception_dates: Vec<NaiveDate>,
}

impl Availability {
    /// 判定指定日期是否可用
    ///
    /// # 规则
    /// - always: 不在例外日期中 → 可用
    /// - never:  在例外日期中 → 可用
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        let listed = self.exception_dates.contains(&date);
        match self.mode {
            AvailabilityMode::DefaultAvailable => !listed,
            AvailabilityMode::DefaultUnavailable => listed,
        }
    }
}

impl Publisher {
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.availability.is_available_on(date)
    }

    /// 姓名或别名是否与给定姓名匹配(忽略大小写与变音符号)
    pub fn matches_name(&self, name: &str) -> bool {
        let target = normalize_name(name);
        if target.is_empty() {
            return false;
        }
        normalize_name(&self.name) == target
            || self.aliases.iter().any(|alias| normalize_name(alias) == target)
    }

    pub fn is_parent(&self, candidate_id: &str) -> bool {
        self.parent_ids.iter().any(|id| id == candidate_id)
    }
}

/// 按姓名(含别名)查找传道员
pub fn find_by_name<'a>(publishers: &'a [Publisher], name: &str) -> Option<&'a Publisher> {
    publishers.iter().find(|p| p.matches_name(name))
}

/// 姓名归一化: 去首尾空白、小写、去除拉丁变音符号
///
/// 历史记录按自由文本姓名关联,匹配前统一经过此函数
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(fold_diacritic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher(name: &str, aliases: &[&str]) -> Publisher {
        Publisher {
            id: "p1".to_string(),
            name: name.to_string(),
            gender: Gender::Brother,
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
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_normalize_name_strips_accents() {
        assert_eq!(normalize_name("  João Conceição "), "joao conceicao");
        assert_eq!(normalize_name("ÉLIO"), "elio");
    }

    #[test]
    fn test_matches_name_and_alias() {
        let p = publisher("José Antônio", &["Zé"]);
        assert!(p.matches_name("jose antonio"));
        assert!(p.matches_name("ZÉ"));
        assert!(!p.matches_name(""));
        assert!(!p.matches_name("Antônio"));
    }

    #[test]
    fn test_availability_modes() {
        let d1 = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 11, 12).unwrap();

        let always = Availability {
            mode: AvailabilityMode::DefaultAvailable,
            exception_dates: vec![d1],
        };
        assert!(!always.is_available_on(d1));
        assert!(always.is_available_on(d2));

        let never = Availability {
            mode: AvailabilityMode::DefaultUnavailable,
            exception_dates: vec![d1],
        };
        assert!(never.is_available_on(d1));
        assert!(!never.is_available_on(d2));
    }

    #[test]
    fn test_deserialize_minimal_publisher() {
        let json = r#"{"id":"a","name":"Ana","gender":"sister","condition":"Publicador"}"#;
        let p: Publisher = serde_json::from_str(json).unwrap();
        assert!(p.is_serving);
        assert_eq!(p.age_group, AgeGroup::Adult);
        assert!(p.privileges_by_section.can_participate_in_ministry);
        assert!(p.is_available_on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    }
}
