// ==========================================
// 周中聚会排程核心 - 时间线条目
// ==========================================
// 职责: 已分派部分(时间线输入)与带时间戳的展示条目(输出)
// ==========================================

use crate::domain::participation::Participation;
use crate::domain::types::PartType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 已分派部分(时间线输入)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedPart {
    pub id: String,
    pub part_title: String,
    #[serde(rename = "type")]
    pub part_type: PartType,
    #[serde(default)]
    pub duration: Option<i32>,
    pub publisher_name: String,
}

impl AssignedPart {
    pub fn new(id: &str, part_title: &str, part_type: PartType, duration: Option<i32>, publisher_name: &str) -> Self {
        Self {
            id: id.to_string(),
            part_title: part_title.to_string(),
            part_type,
            duration,
            publisher_name: publisher_name.to_string(),
        }
    }

    /// 标题是否包含给定片段(忽略大小写)
    pub fn title_contains(&self, fragment: &str) -> bool {
        self.part_title.to_lowercase().contains(&fragment.to_lowercase())
    }
}

impl From<&Participation> for AssignedPart {
    fn from(p: &Participation) -> Self {
        Self {
            id: p.id.clone(),
            part_title: p.part_title.clone(),
            part_type: p.part_type,
            duration: p.duration,
            publisher_name: p.publisher_name.clone(),
        }
    }
}

/// 展示单元: 主分派部分 + 配对部分(助手/研经朗读)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayUnit {
    #[serde(flatten)]
    pub part: AssignedPart,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<AssignedPart>,
}

impl DisplayUnit {
    pub fn single(part: AssignedPart) -> Self {
        Self { part, pair: None }
    }

    /// "主分派 / 配对" 展示名
    pub fn assignee_display(&self) -> String {
        match &self.pair {
            Some(pair) => format!("{} / {}", self.part.publisher_name, pair.publisher_name),
            None => self.part.publisher_name.clone(),
        }
    }
}

// ==========================================
// 分区标签
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SectionTag {
    Opening,
    Closing,
    Section(PartType),
}

impl From<SectionTag> for String {
    fn from(tag: SectionTag) -> Self {
        tag.to_string()
    }
}

impl TryFrom<String> for SectionTag {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.as_str() {
            "OPENING" => Ok(SectionTag::Opening),
            "CLOSING" => Ok(SectionTag::Closing),
            other => PartType::from_label(other)
                .map(SectionTag::Section)
                .ok_or_else(|| format!("未知分区标签: {}", other)),
        }
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionTag::Opening => write!(f, "OPENING"),
            SectionTag::Closing => write!(f, "CLOSING"),
            SectionTag::Section(t) => write!(f, "{}", t.label()),
        }
    }
}

/// 带时间戳的展示条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEntry {
    pub id: String,
    /// HH:MM
    pub start_time: String,
    pub part_title: String,
    pub assignee_display: String,
    /// "(N min)",时长非正时为空
    pub duration_label: String,
    pub section_tag: SectionTag,
    #[serde(default)]
    pub is_counseling_note: bool,
}
