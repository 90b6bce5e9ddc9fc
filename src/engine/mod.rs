// ==========================================
// 装修承包财务引擎 - 引擎层
// ==========================================
// 职责: 纯计算规则引擎,不做 I/O
// 数据流: 成本汇总 → 利润分级 & 挣值评估 → 阶段偏差 → 燃烧率预警
// ==========================================

pub mod burn_rate;
pub mod cost_aggregator;
pub mod currency;
pub mod earned_value;
pub mod financial_engine;
pub mod margin;
pub mod portfolio;
pub mod stage_variance;

// 重导出核心引擎
pub use burn_rate::BurnRateNarrator;
pub use cost_aggregator::{CostAggregator, CostBreakdown};
pub use currency::format_currency;
pub use earned_value::EarnedValueEvaluator;
pub use financial_engine::FinancialEngine;
pub use margin::MarginClassifier;
pub use portfolio::PortfolioEngine;
pub use stage_variance::StageVarianceAnalyzer;
