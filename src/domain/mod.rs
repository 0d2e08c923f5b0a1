// ==========================================
// 周中聚会排程核心 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含引擎逻辑,不含 I/O
// ==========================================

pub mod event;
pub mod part;
pub mod participation;
pub mod publisher;
pub mod rule;
pub mod timeline;
pub mod types;

// 重导出核心类型
pub use event::{
    event_for_week, EventConfiguration, EventDefaults, EventImpact, EventTemplate, SpecialEvent,
    TargetTypes, TimeReduction,
};
pub use part::{
    to_parts_to_assign, AssignmentState, Assignments, PartToAssign, PreAssignment, SchedulePart,
};
pub use participation::Participation;
pub use publisher::{
    find_by_name, normalize_name, Availability, Privileges, Publisher, SectionEligibility,
};
pub use rule::{Fact, Operator, Rule, RuleCondition, RuleValue};
pub use timeline::{AssignedPart, DisplayUnit, SectionTag, TimedEntry};
pub use types::{titles, AgeGroup, AvailabilityMode, Condition, Gender, PartType, SortMode};
