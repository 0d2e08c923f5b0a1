// ==========================================
// 周中聚会排程核心 - 特别活动与活动模板
// ==========================================
// 模板声明结构影响(替换单个部分 / 替换整组类型 / 追加)
// 活动实例把模板绑定到某一周,每周最多一个
// ==========================================

use crate::domain::types::PartType;
use serde::{Deserialize, Serialize};

// ==========================================
// 目标类型(单个或多个)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetTypes {
    One(PartType),
    Many(Vec<PartType>),
}

impl Default for TargetTypes {
    fn default() -> Self {
        TargetTypes::Many(Vec::new())
    }
}

impl TargetTypes {
    pub fn first(&self) -> Option<PartType> {
        match self {
            TargetTypes::One(t) => Some(*t),
            TargetTypes::Many(list) => list.first().copied(),
        }
    }

    pub fn contains(&self, part_type: PartType) -> bool {
        match self {
            TargetTypes::One(t) => *t == part_type,
            TargetTypes::Many(list) => list.contains(&part_type),
        }
    }
}

// ==========================================
// 结构影响
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventImpact {
    /// 替换第一个匹配目标类型的部分
    ReplacePart {
        #[serde(rename = "targetType", default)]
        target_type: TargetTypes,
    },
    /// 删除所有目标类型的部分,追加特别部分
    ReplaceSection {
        #[serde(rename = "targetType", default)]
        target_type: TargetTypes,
    },
    /// 插入到研经主持之前(否则追加)
    AddPart,
    /// 改派声明: 不改变部分结构
    ReassignPart {
        #[serde(rename = "reassignTarget", default, skip_serializing_if = "Option::is_none")]
        reassign_target: Option<PartType>,
    },
    /// 未识别的动作,忽略
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefaults {
    pub duration: i32,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub requires_theme: bool,
    #[serde(default)]
    pub requires_assignee: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub impact: EventImpact,
    pub defaults: EventDefaults,
}

impl EventTemplate {
    /// 模板名称包含标记词(忽略大小写)即视为分区监督访问类活动
    pub fn is_circuit_overseer_visit(&self, marker: &str) -> bool {
        !marker.is_empty() && self.name.to_lowercase().contains(&marker.to_lowercase())
    }
}

// ==========================================
// 特别活动实例
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeReduction {
    pub target_type: PartType,
    pub minutes: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfiguration {
    #[serde(default)]
    pub time_reduction: Option<TimeReduction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialEvent {
    pub id: String,
    pub week: String,
    pub template_id: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub assigned_to: String,
    pub duration: i32,
    #[serde(default)]
    pub configuration: EventConfiguration,
}

/// 查找指定周的活动及其模板(每周最多一个活动生效,取第一个)
pub fn event_for_week<'a>(
    events: &'a [SpecialEvent],
    templates: &'a [EventTemplate],
    week: &str,
) -> Option<(&'a SpecialEvent, &'a EventTemplate)> {
    let event = events.iter().find(|e| e.week == week)?;
    let template = templates.iter().find(|t| t.id == event.template_id)?;
    Some((event, template))
}
