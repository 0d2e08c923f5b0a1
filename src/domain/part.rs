// ==========================================
// 周中聚会排程核心 - 聚会部分与分派状态
// ==========================================
// 职责: 原始/规范化部分、待分派部分、分派槽位
// ==========================================

use crate::domain::types::{titles, PartType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 部分 id → 分派槽位
pub type Assignments = BTreeMap<String, AssignmentState>;

// ==========================================
// 预分派标记
// ==========================================
// 序列化兼容外部数据: "Presidente" 表示主席,其余为字面姓名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PreAssignment {
    PresidingOfficer,
    Named(String),
}

impl From<String> for PreAssignment {
    fn from(raw: String) -> Self {
        if raw.trim() == titles::PRESIDING_OFFICER {
            PreAssignment::PresidingOfficer
        } else {
            PreAssignment::Named(raw)
        }
    }
}

impl From<PreAssignment> for String {
    fn from(value: PreAssignment) -> Self {
        match value {
            PreAssignment::PresidingOfficer => titles::PRESIDING_OFFICER.to_string(),
            PreAssignment::Named(name) => name,
        }
    }
}

// ==========================================
// SchedulePart - 规范化前后的部分
// ==========================================
// 原始抽取结果没有 id,规范化保持输入 id(若有)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub part_title: String,
    #[serde(rename = "type")]
    pub part_type: PartType,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub requires_helper: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_assigned_to: Option<PreAssignment>,
}

impl SchedulePart {
    pub fn new(part_title: &str, part_type: PartType, duration: i32) -> Self {
        Self {
            id: None,
            part_title: part_title.to_string(),
            part_type,
            duration: Some(duration),
            requires_helper: false,
            pre_assigned_to: None,
        }
    }

    pub fn presided(mut self) -> Self {
        self.pre_assigned_to = Some(PreAssignment::PresidingOfficer);
        self
    }

    pub fn with_helper(mut self) -> Self {
        self.requires_helper = true;
        self
    }

    /// 标题是否包含给定片段(忽略大小写)
    pub fn title_contains(&self, fragment: &str) -> bool {
        self.part_title
            .to_lowercase()
            .contains(&fragment.to_lowercase())
    }

    /// 转为待分派部分,无 id 时按序号生成
    pub fn into_part_to_assign(self, index: usize) -> PartToAssign {
        PartToAssign {
            id: self.id.unwrap_or_else(|| format!("std-part-{}", index)),
            part_title: self.part_title,
            part_type: self.part_type,
            duration: self.duration,
            requires_helper: self.requires_helper,
            pre_assigned_to: self.pre_assigned_to,
        }
    }
}

// ==========================================
// PartToAssign - 待分派部分
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartToAssign {
    pub id: String,
    pub part_title: String,
    #[serde(rename = "type")]
    pub part_type: PartType,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub requires_helper: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_assigned_to: Option<PreAssignment>,
}

impl PartToAssign {
    /// 是否为主席部分(类型 + 标题同时匹配)
    pub fn is_presiding_officer_slot(&self) -> bool {
        self.part_type == PartType::PresidingOfficer
            && self.part_title == titles::PRESIDING_OFFICER
    }

    pub fn is_presided(&self) -> bool {
        self.pre_assigned_to == Some(PreAssignment::PresidingOfficer)
    }
}

/// 将规范化结果转为待分派列表
pub fn to_parts_to_assign(parts: Vec<SchedulePart>) -> Vec<PartToAssign> {
    parts
        .into_iter()
        .enumerate()
        .map(|(index, part)| part.into_part_to_assign(index))
        .collect()
}

// ==========================================
// AssignmentState - 分派槽位
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentState {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_id: Option<String>,
}

impl AssignmentState {
    /// 主分派人(空字符串视为未分派)
    pub fn student(&self) -> Option<&str> {
        self.student_id.as_deref().filter(|id| !id.is_empty())
    }

    /// 助手(空字符串视为未分派)
    pub fn helper(&self) -> Option<&str> {
        self.helper_id.as_deref().filter(|id| !id.is_empty())
    }
}
