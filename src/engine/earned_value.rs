// ==========================================
// 装修承包财务引擎 - 挣值评估引擎
// ==========================================
// 职责: CPI / SPI / EAC / VAC
// 模型: 简化双比率模型 (完工百分比 / 花费百分比)
// 红线: 除零一律中和为有限值,不产生 NaN/Infinity
// ==========================================

use crate::domain::financials::EarnedValue;
use crate::domain::types::{CostPerformance, CpiBasis};
use crate::engine::currency::format_currency;

/// 中性指数
const NEUTRAL_INDEX: f64 = 1.0;

// ==========================================
// EarnedValueEvaluator - 挣值评估引擎
// ==========================================
pub struct EarnedValueEvaluator {
    cpi_ceiling: f64,
}

impl EarnedValueEvaluator {
    /// 构造函数
    ///
    /// # 参数
    /// - `cpi_ceiling`: CPI 上界 (花费为 0 但已有进度时直接取该值)
    pub fn new(cpi_ceiling: f64) -> Self {
        Self { cpi_ceiling }
    }

    /// 计算挣值指标
    ///
    /// # 参数
    /// - `job_value`: 合同价
    /// - `percent_complete`: 完工百分比
    /// - `percent_spent`: 花费百分比 (与成本字段相互独立)
    /// - `schedule_performance_index`: 外部提供的 SPI,缺失或非有限值取 1.0
    pub fn evaluate(
        &self,
        job_value: f64,
        percent_complete: f64,
        percent_spent: f64,
        schedule_performance_index: Option<f64>,
    ) -> EarnedValue {
        let (cpi, cpi_basis) = self.cost_performance_index(percent_complete, percent_spent);

        let spi = schedule_performance_index
            .filter(|v| v.is_finite())
            .unwrap_or(NEUTRAL_INDEX);

        let estimate_at_completion = if cpi > 0.0 { job_value / cpi } else { job_value };
        let variance_at_completion = job_value - estimate_at_completion;

        let cost_performance = if cpi >= 1.0 {
            CostPerformance::Efficient
        } else {
            CostPerformance::Overrun
        };

        let forecast_note = match cost_performance {
            CostPerformance::Efficient => format!(
                "CPI {:.2}: work is being delivered at or under budget. Projected savings at completion: {}.",
                cpi,
                format_currency(variance_at_completion)
            ),
            CostPerformance::Overrun => format!(
                "CPI {:.2}: cost is running ahead of progress. Projected loss at completion: {}.",
                cpi,
                format_currency(variance_at_completion.abs())
            ),
        };

        EarnedValue {
            cpi,
            cpi_basis,
            spi,
            estimate_at_completion,
            variance_at_completion,
            cost_performance,
            forecast_note,
        }
    }

    /// CPI = percent_complete / percent_spent
    ///
    /// - percent_spent > 0: 实测值 (仅非有限值时取上界)
    /// - percent_spent == 0 且已有进度: 首次成本过账前的瞬态,取上界
    /// - 两者都为 0: 中性 1.0
    fn cost_performance_index(&self, percent_complete: f64, percent_spent: f64) -> (f64, CpiBasis) {
        if percent_spent > 0.0 {
            let raw = percent_complete / percent_spent;
            if !raw.is_finite() {
                return (self.cpi_ceiling, CpiBasis::Clamped);
            }
            return (raw, CpiBasis::Measured);
        }

        if percent_complete > 0.0 {
            (self.cpi_ceiling, CpiBasis::Clamped)
        } else {
            (NEUTRAL_INDEX, CpiBasis::Neutral)
        }
    }
}

impl Default for EarnedValueEvaluator {
    fn default() -> Self {
        Self::new(crate::config::EngineConfig::default().cpi_ceiling)
    }
}
