// ==========================================
// 装修承包财务引擎 - 导入层
// ==========================================
// 职责: 外部成本流水导入 (CSV)
// ==========================================

pub mod cost_line_importer;
pub mod error;
pub mod file_parser;

// 重导出核心类型
pub use cost_line_importer::CostLineImporter;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, RawRecord};
