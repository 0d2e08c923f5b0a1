// ==========================================
// 周中聚会排程核心 - 引擎层
// ==========================================
// 职责: 资格判定、候选排序、结构规范化、自动分派、时间线编排
// 红线: 引擎无状态、无 I/O;所有不合格判定必须输出原因
// ==========================================

pub mod assignment_editor;
pub mod auto_fill;
pub mod candidate_ranker;
pub mod event_impact;
pub mod intake;
pub mod normalizer;
pub mod pairing;
pub mod participation_builder;
pub mod rule_evaluator;
pub mod statistics;
pub mod timeline;

// 重导出核心引擎
pub use assignment_editor::{AssignmentEditor, MissingSlot, Slot};
pub use auto_fill::AutoFillAssigner;
pub use candidate_ranker::{CandidateRanker, RankedCandidate, RankingPool};
pub use event_impact::EventImpactApplier;
pub use intake::{infer_part_type, ExtractedItem, ItemKind, PartIntake};
pub use normalizer::ScheduleNormalizer;
pub use pairing::PairingValidator;
pub use participation_builder::ParticipationBuilder;
pub use rule_evaluator::{RuleContext, RuleEvaluator, ValidationOutcome};
pub use statistics::{OverallSummary, PublisherStats, StatisticsEngine};
pub use timeline::TimelineComposer;
