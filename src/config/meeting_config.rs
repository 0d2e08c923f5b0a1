// ==========================================
// 周中聚会排程核心 - 聚会配置
// ==========================================
// 职责: 时间线起始时间、固定时长、展示标签
// 说明: 全部字段有默认值,配置文件可只写需要覆写的键
// ==========================================

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// 固定部分时长(分钟),时间线忽略存储值而使用这里的值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixedDurations {
    pub presiding_officer: i32,
    pub opening_prayer: i32,
    pub opening_comments: i32,
    pub closing_comments: i32,
    pub closing_prayer: i32,
}

impl Default for FixedDurations {
    fn default() -> Self {
        Self {
            presiding_officer: 0,
            opening_prayer: 1,
            opening_comments: 1,
            closing_comments: 3,
            closing_prayer: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeetingConfig {
    /// 聚会开始时间 HH:MM
    pub meeting_start: String,
    pub fixed_durations: FixedDurations,
    /// 辅导条目时长
    pub counseling_minutes: i32,
    pub song_minutes: i32,
    /// 缩时目标无存储时长时的基准值
    pub reduction_fallback_minutes: i32,
    /// 主席部分标题
    pub presiding_officer_label: String,
    /// 未分派时的展示名
    pub unassigned_label: String,
    /// 分区监督访问类模板名称中的标记词(忽略大小写)
    pub circuit_overseer_marker: String,
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            meeting_start: "19:30".to_string(),
            fixed_durations: FixedDurations::default(),
            counseling_minutes: 1,
            song_minutes: 3,
            reduction_fallback_minutes: 30,
            presiding_officer_label: "Presidente".to_string(),
            unassigned_label: "N/D".to_string(),
            circuit_overseer_marker: "superintendente".to_string(),
        }
    }
}

impl MeetingConfig {
    /// 解析开始时间;格式无效时返回 None
    pub fn start_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.meeting_start.trim(), "%H:%M").ok()
    }

    /// 验证配置
    ///
    /// # 验证规则
    /// 1. 开始时间为 HH:MM
    /// 2. 辅导时长为正
    /// 3. 固定时长与诗歌时长非负
    /// 4. 标签非空
    pub fn validate(&self) -> Result<(), String> {
        if self.start_time().is_none() {
            return Err(format!("聚会开始时间格式无效: {}", self.meeting_start));
        }
        if self.counseling_minutes <= 0 {
            return Err(format!("辅导时长必须为正: {}", self.counseling_minutes));
        }

        let d = &self.fixed_durations;
        let durations = [
            ("presidingOfficer", d.presiding_officer),
            ("openingPrayer", d.opening_prayer),
            ("openingComments", d.opening_comments),
            ("closingComments", d.closing_comments),
            ("closingPrayer", d.closing_prayer),
            ("songMinutes", self.song_minutes),
            ("reductionFallbackMinutes", self.reduction_fallback_minutes),
        ];
        if let Some((key, value)) = durations.iter().find(|(_, v)| *v < 0) {
            return Err(format!("时长不能为负: {}={}", key, value));
        }

        for (key, value) in [
            ("presidingOfficerLabel", &self.presiding_officer_label),
            ("unassignedLabel", &self.unassigned_label),
            ("circuitOverseerMarker", &self.circuit_overseer_marker),
        ] {
            if value.trim().is_empty() {
                return Err(format!("标签不能为空: {}", key));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MeetingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.start_time(), NaiveTime::from_hms_opt(19, 30, 0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: MeetingConfig =
            serde_json::from_str(r#"{"meetingStart":"19:00","fixedDurations":{"closingComments":5}}"#)
                .unwrap();
        assert_eq!(config.meeting_start, "19:00");
        assert_eq!(config.fixed_durations.closing_comments, 5);
        assert_eq!(config.fixed_durations.opening_prayer, 1);
        assert_eq!(config.unassigned_label, "N/D");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MeetingConfig::default();
        config.counseling_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = MeetingConfig::default();
        config.meeting_start = "7pm".to_string();
        assert!(config.validate().is_err());

        let mut config = MeetingConfig::default();
        config.unassigned_label = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = MeetingConfig::default();
        config.fixed_durations.closing_prayer = -1;
        assert!(config.validate().is_err());
    }
}
