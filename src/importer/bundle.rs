// ==========================================
// 周中聚会排程核心 - 周数据包
// ==========================================
// 职责: 一周排程所需全部输入的 JSON 载体
// 内容: 传道员、历史、规则、原始部分(或抽取条目)、现有分派、活动与模板
// ==========================================
// 说明: rules / templates 缺省时使用内置初始数据
// ==========================================

use crate::calendar::WeekContext;
use crate::config::defaults::{default_event_templates, default_rules};
use crate::domain::event::{event_for_week, EventTemplate, SpecialEvent};
use crate::domain::part::{Assignments, SchedulePart};
use crate::domain::participation::Participation;
use crate::domain::publisher::Publisher;
use crate::domain::rule::Rule;
use crate::engine::intake::{ExtractedItem, PartIntake};
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBundle {
    /// 周 id 或手册周标签
    pub week: String,
    #[serde(default)]
    pub publishers: Vec<Publisher>,
    #[serde(default)]
    pub history: Vec<Participation>,
    #[serde(default = "default_rules")]
    pub rules: Vec<Rule>,
    /// 原始部分(优先)
    #[serde(default)]
    pub parts: Vec<SchedulePart>,
    /// 抽取条目(parts 为空时使用)
    #[serde(default)]
    pub items: Vec<ExtractedItem>,
    #[serde(default)]
    pub assignments: Assignments,
    #[serde(default)]
    pub events: Vec<SpecialEvent>,
    #[serde(default = "default_event_templates")]
    pub templates: Vec<EventTemplate>,
}

impl WeekBundle {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let raw = fs::read_to_string(path)?;
        let bundle = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            week = %bundle.week,
            publishers = bundle.publishers.len(),
            history = bundle.history.len(),
            "周数据包加载完成"
        );
        Ok(bundle)
    }

    pub fn from_json(raw: &str) -> ImportResult<Self> {
        let bundle: Self = serde_json::from_str(raw)?;
        if bundle.week.trim().is_empty() {
            return Err(ImportError::InvalidBundle("week 不能为空".to_string()));
        }
        Ok(bundle)
    }

    /// 周上下文(标签无法解析时以 today 为聚会日)
    pub fn week_context(&self, today: NaiveDate) -> WeekContext {
        WeekContext::from_week_label(&self.week, today)
    }

    /// 原始部分: 优先取 parts,否则对抽取条目分类
    pub fn raw_parts(&self) -> Vec<SchedulePart> {
        if !self.parts.is_empty() {
            return self.parts.clone();
        }
        PartIntake::new().classify(&self.items)
    }

    /// 本周生效的活动及其模板
    pub fn event_for(&self, week: &WeekContext) -> Option<(&SpecialEvent, &EventTemplate)> {
        let found = event_for_week(&self.events, &self.templates, &week.week_id);
        if found.is_none() && self.events.iter().any(|e| e.week == week.week_id) {
            warn!(week = %week.week_id, "活动引用的模板不存在,忽略该活动");
        }
        found
    }
}
