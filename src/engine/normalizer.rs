// ==========================================
// 周中聚会排程核心 - 规范结构引擎
// ==========================================
// 职责: 将无序的原始部分列表整理为规范聚会结构
// 输入: 外部抽取的原始部分(无序,可能缺失或重复)
// 输出: 有序部分列表,固定部分保证存在
// ==========================================
// 红线: 纯函数、确定性、幂等
// 红线: 主席/开场祷告/开场评论/结束评论/结束祷告各恰好一个
// ==========================================

mod core;
pub mod matchers;


pub use core::ScheduleNormalizer;
