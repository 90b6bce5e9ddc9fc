// ==========================================
// 装修承包财务引擎 - 财务派生结果模型
// ==========================================
// 用途: 驾驶舱只读投影,每次读取重新计算,不持久化
// ==========================================

use crate::domain::types::{CostPerformance, CpiBasis, MarginStatus, StageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// MarginAssessment - 利润评估
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginAssessment {
    pub margin_dollar: f64,        // 利润金额 = 合同价 - 实际成本
    pub margin_pct: f64,           // 利润率 (合同价为 0 时取 0)
    pub margin_defined: bool,      // 合同价为 0 时为 false
    pub margin_shortfall_pct: f64, // 低于投标利润率的缺口 (>= 0)
    pub margin_status: MarginStatus,
}

impl MarginAssessment {
    /// 展示用利润率 (保留一位小数)
    pub fn margin_pct_display(&self) -> f64 {
        (self.margin_pct * 10.0).round() / 10.0
    }
}

// ==========================================
// EarnedValue - 挣值指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedValue {
    pub cpi: f64,
    pub cpi_basis: CpiBasis,
    pub spi: f64,
    pub estimate_at_completion: f64,
    pub variance_at_completion: f64,
    pub cost_performance: CostPerformance,
    pub forecast_note: String, // 挣值说明 (超支时给出预计亏损)
}

// ==========================================
// StageVariance - 阶段预算偏差
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageVariance {
    pub name: String,
    pub status: StageStatus,
    pub budgeted: f64,
    pub actual: f64,
    pub variance: f64,        // budgeted - actual (正数 = 未超支)
    pub progress_percent: u8, // [0, 100]
}

impl StageVariance {
    pub fn is_over_budget(&self) -> bool {
        self.variance < 0.0
    }

    /// 超支金额 (actual - budgeted),未超支返回 None
    pub fn overage(&self) -> Option<f64> {
        if self.is_over_budget() {
            Some(-self.variance)
        } else {
            None
        }
    }
}

// ==========================================
// DerivedResult - 单项目财务投影
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedResult {
    pub project_id: String,
    pub job_value: f64,
    pub total_cost_live: f64,

    #[serde(flatten)]
    pub margin: MarginAssessment,

    #[serde(flatten)]
    pub earned_value: EarnedValue,

    pub stage_variances: Vec<StageVariance>,
    pub daily_total_burn: f64,            // 人工 + 材料日均支出
    pub burn_warning: Option<String>,     // 利润健康时为 None
}

// ==========================================
// FinancialReport - API 层报告信封
// ==========================================
// 报告ID与时间戳只存在于信封中,DerivedResult 保持幂等
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub result: DerivedResult,
}

impl FinancialReport {
    pub fn new(result: DerivedResult) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            result,
        }
    }
}

// ==========================================
// PortfolioSummary - 项目组合汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub project_count: usize,
    pub healthy_count: usize,
    pub warning_count: usize,
    pub danger_count: usize,
    pub total_job_value: f64,
    pub total_cost_live: f64,
    pub total_margin_dollar: f64,
    pub ranked_project_ids: Vec<String>, // 风险从高到低
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_variance(budgeted: f64, actual: f64) -> StageVariance {
        StageVariance {
            name: "Framing".to_string(),
            status: StageStatus::Complete,
            budgeted,
            actual,
            variance: budgeted - actual,
            progress_percent: 100,
        }
    }

    #[test]
    fn test_stage_variance_overage() {
        let over = create_test_variance(14000.0, 15800.0);
        assert!(over.is_over_budget());
        assert_eq!(over.overage(), Some(1800.0));

        let exact = create_test_variance(3000.0, 3000.0);
        assert!(!exact.is_over_budget());
        assert_eq!(exact.overage(), None);

        let under = create_test_variance(3000.0, 2500.0);
        assert_eq!(under.overage(), None);
    }
}
