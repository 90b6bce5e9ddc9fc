// ==========================================
// 装修承包财务引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、派生结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod error;
pub mod financials;
pub mod project;
pub mod types;

// 重导出核心类型
pub use error::{DomainError, DomainResult};
pub use financials::{
    DerivedResult, EarnedValue, FinancialReport, MarginAssessment, PortfolioSummary,
    StageVariance,
};
pub use project::{CostLineItem, Project, Stage};
pub use types::{CostCategory, CostPerformance, CpiBasis, MarginStatus, StageStatus};
