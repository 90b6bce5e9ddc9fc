// ==========================================
// 装修承包财务引擎 - 项目组合汇总引擎
// ==========================================
// 职责: 多项目派生结果 → 汇总指标 + 风险排序
// ==========================================

use crate::domain::financials::{DerivedResult, PortfolioSummary};
use crate::domain::types::MarginStatus;
use std::cmp::Ordering;

pub struct PortfolioEngine {
    // 无状态引擎
}

impl PortfolioEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总项目组合
    pub fn summarize(&self, results: &[DerivedResult]) -> PortfolioSummary {
        let mut summary = PortfolioSummary {
            project_count: results.len(),
            ..Default::default()
        };

        for result in results {
            match result.margin.margin_status {
                MarginStatus::Healthy => summary.healthy_count += 1,
                MarginStatus::Warning => summary.warning_count += 1,
                MarginStatus::Danger => summary.danger_count += 1,
            }
            summary.total_job_value += result.job_value;
            summary.total_cost_live += result.total_cost_live;
            summary.total_margin_dollar += result.margin.margin_dollar;
        }

        summary.ranked_project_ids = self
            .rank(results)
            .into_iter()
            .map(|r| r.project_id.clone())
            .collect();

        summary
    }

    /// 风险排序 (从高到低)
    ///
    /// # 规则
    /// - 利润状态 (DANGER > WARNING > HEALTHY)
    /// - 相同状态比较利润缺口 (大者优先)
    /// - 相同缺口比较 CPI (小者优先)
    /// - 最后按 project_id,保证结果稳定
    pub fn rank<'a>(&self, results: &'a [DerivedResult]) -> Vec<&'a DerivedResult> {
        let mut ranked: Vec<&DerivedResult> = results.iter().collect();
        ranked.sort_by(|a, b| compare_risk(a, b));
        ranked
    }
}

fn compare_risk(a: &DerivedResult, b: &DerivedResult) -> Ordering {
    b.margin
        .margin_status
        .cmp(&a.margin.margin_status)
        .then_with(|| {
            b.margin
                .margin_shortfall_pct
                .total_cmp(&a.margin.margin_shortfall_pct)
        })
        .then_with(|| a.earned_value.cpi.total_cmp(&b.earned_value.cpi))
        .then_with(|| a.project_id.cmp(&b.project_id))
}

impl Default for PortfolioEngine {
    fn default() -> Self {
        Self::new()
    }
}
