// ==========================================
// 周中聚会排程核心 - 参与记录
// ==========================================
// 职责: 已完成分派的历史记录(创建后不可变)
// 说明: publisher_name 为自由文本,不是外键,允许无法匹配的姓名
// ==========================================

use crate::domain::types::PartType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: String,
    pub publisher_name: String,
    /// 周 id(ISO 周一日期或旧式标签)
    pub week: String,
    /// 具体聚会日期
    pub date: DateTime<Utc>,
    pub part_title: String,
    #[serde(rename = "type")]
    pub part_type: PartType,
    #[serde(default)]
    pub duration: Option<i32>,
}

impl Participation {
    /// 排序用时间戳(毫秒)
    pub fn timestamp_millis(&self) -> i64 {
        self.date.timestamp_millis()
    }
}
