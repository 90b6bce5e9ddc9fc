// ==========================================
// 装修承包财务引擎 - 配置层
// ==========================================
// 职责: 引擎阈值配置,支持文件 + 环境变量覆写
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod error;

// 重导出核心配置类型
pub use config_manager::{config_keys, default_config_path, ConfigManager};
pub use engine_config::EngineConfig;
pub use error::{ConfigError, ConfigResult};
