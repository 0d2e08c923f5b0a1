// ==========================================
// 周中聚会排程核心 - 导入层
// ==========================================
// 职责: 外部文件 → 领域数据
// 支持: 历史记录 CSV, 周数据包 JSON
// ==========================================

pub mod bundle;
pub mod error;
pub mod history_csv;

// 重导出核心类型
pub use bundle::WeekBundle;
pub use error::{ImportError, ImportResult};
pub use history_csv::HistoryCsvImporter;
