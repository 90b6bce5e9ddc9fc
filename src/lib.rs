// ==========================================
// 装修承包项目财务绩效引擎 - 核心库
// ==========================================
// 定位: 纯计算引擎 (利润分级 / 挣值 / 阶段偏差 / 燃烧率预警)
// 输入: 项目 + 阶段快照;输出: 派生财务投影
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 计算规则
pub mod engine;

// 配置层 - 引擎阈值
pub mod config;

// 数据仓储层 - 外部记录系统抽象
pub mod repository;

// 导入层 - 成本流水
pub mod importer;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CostCategory, CostPerformance, CpiBasis, MarginStatus, StageStatus};

// 领域实体与派生结果
pub use domain::{
    CostLineItem, DerivedResult, DomainError, EarnedValue, FinancialReport, MarginAssessment,
    PortfolioSummary, Project, Stage, StageVariance,
};

// 引擎
pub use engine::{
    BurnRateNarrator, CostAggregator, CostBreakdown, EarnedValueEvaluator, FinancialEngine,
    MarginClassifier, PortfolioEngine, StageVarianceAnalyzer,
};

// 配置
pub use config::{ConfigManager, EngineConfig};

// API
pub use api::{ApiError, ProjectFinancialsApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "装修承包项目财务绩效引擎";
