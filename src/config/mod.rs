// ==========================================
// 周中聚会排程核心 - 配置层
// ==========================================
// 职责: 聚会配置加载与校验、初始规则与活动模板
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod defaults;
pub mod meeting_config;

pub use config_manager::{ConfigError, ConfigManager};
pub use defaults::{default_event_templates, default_rules};
pub use meeting_config::{FixedDurations, MeetingConfig};
