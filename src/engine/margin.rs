// ==========================================
// 装修承包财务引擎 - 利润分级引擎
// ==========================================
// 职责: 实际利润 vs 投标利润率 → 风险分级
// 输出: MarginAssessment
// ==========================================

use crate::domain::financials::MarginAssessment;
use crate::domain::types::MarginStatus;

// ==========================================
// MarginClassifier - 利润分级引擎
// ==========================================
pub struct MarginClassifier {
    danger_threshold_pct: f64, // 缺口达到该百分点即为 danger
}

impl MarginClassifier {
    /// 构造函数
    ///
    /// # 参数
    /// - `danger_threshold_pct`: warning / danger 分界 (低于目标的百分点)
    pub fn new(danger_threshold_pct: f64) -> Self {
        Self {
            danger_threshold_pct,
        }
    }

    /// 计算利润并分级
    ///
    /// # 规则
    /// - margin_dollar = job_value - total_cost_live
    /// - margin_pct = margin_dollar / job_value * 100 (job_value 为 0 时取 0, margin_defined = false)
    /// - HEALTHY: margin_pct >= estimated_margin_pct (相等也算健康)
    /// - DANGER: 缺口 >= danger_threshold_pct
    /// - WARNING: 其余任何缺口
    pub fn classify(
        &self,
        job_value: f64,
        total_cost_live: f64,
        estimated_margin_pct: f64,
    ) -> MarginAssessment {
        let margin_dollar = job_value - total_cost_live;

        let (margin_pct, margin_defined) = if job_value == 0.0 {
            (0.0, false)
        } else {
            let pct = margin_dollar / job_value * 100.0;
            if pct.is_finite() {
                (pct, true)
            } else {
                (0.0, false)
            }
        };

        let margin_status = self.status_for(margin_pct, estimated_margin_pct);

        MarginAssessment {
            margin_dollar,
            margin_pct,
            margin_defined,
            margin_shortfall_pct: (estimated_margin_pct - margin_pct).max(0.0),
            margin_status,
        }
    }

    fn status_for(&self, margin_pct: f64, estimated_margin_pct: f64) -> MarginStatus {
        if margin_pct >= estimated_margin_pct {
            return MarginStatus::Healthy;
        }

        let shortfall = estimated_margin_pct - margin_pct;
        if shortfall >= self.danger_threshold_pct {
            MarginStatus::Danger
        } else {
            MarginStatus::Warning
        }
    }
}

impl Default for MarginClassifier {
    fn default() -> Self {
        Self::new(crate::config::EngineConfig::default().danger_threshold_pct)
    }
}
