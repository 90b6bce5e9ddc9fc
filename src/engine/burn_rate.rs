// ==========================================
// 装修承包财务引擎 - 燃烧率预警引擎
// ==========================================
// 职责: 利润分级 + 阶段超支 + 日均燃烧率 → 自然语言预警
// 输出: Option<String> (利润健康时为 None)
// ==========================================

use crate::domain::financials::{MarginAssessment, StageVariance};
use crate::domain::types::StageStatus;
use crate::engine::currency::format_currency;

// ==========================================
// BurnRateNarrator - 燃烧率预警引擎
// ==========================================
pub struct BurnRateNarrator {
    // 无状态引擎
}

impl BurnRateNarrator {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成预警文本
    ///
    /// # 规则
    /// 1. 利润健康 → None
    /// 2. 存在已完工且超支的阶段 → 指出超支最多的阶段 (并列取阶段顺序第一个)
    /// 3. 否则 → 用剩余阶段预算 / 日均人工燃烧率 预测可支撑天数,与剩余工期对比
    ///    (日均人工燃烧率为 0 时省略预测)
    ///
    /// # 参数
    /// - `margin`: 利润评估
    /// - `variances`: 阶段偏差 (阶段顺序)
    /// - `total_cost_live`: 实际总成本
    /// - `daily_labor_burn`: 日均人工支出
    /// - `days_remaining`: 剩余计划工期
    pub fn narrate(
        &self,
        margin: &MarginAssessment,
        variances: &[StageVariance],
        total_cost_live: f64,
        daily_labor_burn: f64,
        days_remaining: u32,
    ) -> Option<String> {
        if margin.margin_status.is_healthy() {
            return None;
        }

        if let Some((stage, overage)) = self.worst_completed_overage(variances) {
            return Some(format!(
                "You are burning cash on the {} stage. Labor exceeded estimate by {}.",
                stage.name,
                format_currency(overage)
            ));
        }

        let total_budget: f64 = variances.iter().map(|v| v.budgeted).sum();
        Some(self.projection_message(
            total_budget - total_cost_live,
            daily_labor_burn,
            days_remaining,
        ))
    }

    /// 已完工阶段中超支最多的一个
    fn worst_completed_overage<'a>(
        &self,
        variances: &'a [StageVariance],
    ) -> Option<(&'a StageVariance, f64)> {
        let mut worst: Option<(&StageVariance, f64)> = None;

        for variance in variances {
            if variance.status != StageStatus::Complete {
                continue;
            }
            let Some(overage) = variance.overage() else {
                continue;
            };

            // 严格大于: 并列时保留先出现的阶段
            if worst.map_or(true, |(_, best)| overage > best) {
                worst = Some((variance, overage));
            }
        }

        worst
    }

    fn projection_message(
        &self,
        remaining_budget: f64,
        daily_labor_burn: f64,
        days_remaining: u32,
    ) -> String {
        if daily_labor_burn <= 0.0 || !daily_labor_burn.is_finite() {
            return format!(
                "Margin is below target. Daily labor burn rate is unknown, so budget exhaustion cannot be projected. {} days of scheduled work remain.",
                days_remaining
            );
        }

        let days_of_budget = (remaining_budget / daily_labor_burn).floor().max(0.0) as u64;

        format!(
            "Margin is below target. At the current labor burn rate of {}/day, the remaining stage budget covers {} days against {} days of scheduled work remaining.",
            format_currency(daily_labor_burn),
            days_of_budget,
            days_remaining
        )
    }
}

impl Default for BurnRateNarrator {
    fn default() -> Self {
        Self::new()
    }
}
