// ==========================================
// 周中聚会排程核心 - 核心库
// ==========================================
// 职责: 周中聚会角色分派与议程时间线
// 系统定位: 辅助决策(人工最终确认每个槽位)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置与初始数据
pub mod config;

// 周与聚会日期计算
pub mod calendar;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AgeGroup, AvailabilityMode, Condition, Gender, PartType, SortMode};

// 领域实体
pub use domain::{
    AssignedPart, AssignmentState, Assignments, EventTemplate, PartToAssign, Participation,
    Publisher, Rule, SchedulePart, SpecialEvent, TimedEntry,
};

// 引擎
pub use engine::{
    AssignmentEditor, AutoFillAssigner, CandidateRanker, EventImpactApplier, PairingValidator,
    ParticipationBuilder, PartIntake, RuleEvaluator, ScheduleNormalizer, StatisticsEngine,
    TimelineComposer,
};

// 配置
pub use config::{ConfigManager, MeetingConfig};

pub use calendar::WeekContext;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "周中聚会排程核心";
