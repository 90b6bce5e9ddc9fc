// ==========================================
// 装修承包财务引擎 - 阶段偏差分析引擎
// ==========================================
// 职责: 阶段预算 vs 实际,进度百分比
// 红线: 状态为权威输入,不由金额推断
//       (已完工但超支 = 需要暴露的超支,不是需要修正的矛盾)
// ==========================================

use crate::domain::financials::StageVariance;
use crate::domain::project::Stage;
use crate::domain::types::StageStatus;

pub struct StageVarianceAnalyzer {
    // 无状态引擎
}

impl StageVarianceAnalyzer {
    pub fn new() -> Self {
        Self {}
    }

    /// 按阶段顺序逐一计算偏差
    pub fn analyze(&self, stages: &[Stage]) -> Vec<StageVariance> {
        stages
            .iter()
            .map(|stage| StageVariance {
                name: stage.name.clone(),
                status: stage.status,
                budgeted: stage.budgeted,
                actual: stage.actual,
                variance: stage.budgeted - stage.actual,
                progress_percent: self.progress_percent(stage),
            })
            .collect()
    }

    /// 进度百分比
    ///
    /// - complete: 100
    /// - pending: 0
    /// - in_progress: round(actual / budgeted * 100),钳制到 [0, 100];预算为 0 时取 0
    pub fn progress_percent(&self, stage: &Stage) -> u8 {
        match stage.status {
            StageStatus::Complete => 100,
            StageStatus::Pending => 0,
            StageStatus::InProgress => {
                if stage.budgeted <= 0.0 {
                    return 0;
                }
                let pct = (stage.actual / stage.budgeted * 100.0).round();
                if pct.is_finite() {
                    pct.clamp(0.0, 100.0) as u8
                } else {
                    0
                }
            }
        }
    }
}

impl Default for StageVarianceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_d_complete_overrun() {
        let analyzer = StageVarianceAnalyzer::new();
        let stages = vec![Stage::new("Framing", 14000.0, 15800.0, StageStatus::Complete)];

        let result = analyzer.analyze(&stages);
        assert_eq!(result[0].variance, -1800.0);
        assert_eq!(result[0].progress_percent, 100);
        assert!(result[0].is_over_budget());
    }

    #[test]
    fn test_scenario_e_pending_is_zero() {
        let analyzer = StageVarianceAnalyzer::new();
        let pending = Stage::new("Tile", 12000.0, 0.0, StageStatus::Pending);
        assert_eq!(analyzer.progress_percent(&pending), 0);

        // 已记录实际成本的 pending 阶段仍为 0
        let pending_with_cost = Stage::new("Tile", 12000.0, 6000.0, StageStatus::Pending);
        assert_eq!(analyzer.progress_percent(&pending_with_cost), 0);
    }

    #[test]
    fn test_in_progress_rounding_and_clamp() {
        let analyzer = StageVarianceAnalyzer::new();

        let half = Stage::new("Drywall", 8000.0, 4000.0, StageStatus::InProgress);
        assert_eq!(analyzer.progress_percent(&half), 50);

        let rounded = Stage::new("Drywall", 3000.0, 1000.0, StageStatus::InProgress);
        assert_eq!(analyzer.progress_percent(&rounded), 33);

        let over = Stage::new("Drywall", 1000.0, 2500.0, StageStatus::InProgress);
        assert_eq!(analyzer.progress_percent(&over), 100);
    }

    #[test]
    fn test_zero_budget_in_progress() {
        let analyzer = StageVarianceAnalyzer::new();
        let stage = Stage::new("Permits", 0.0, 350.0, StageStatus::InProgress);
        assert_eq!(analyzer.progress_percent(&stage), 0);
        assert_eq!(analyzer.analyze(&[stage])[0].variance, -350.0);
    }

    #[test]
    fn test_progress_always_in_range() {
        let analyzer = StageVarianceAnalyzer::new();
        let amounts = [0.0, 0.4, 1.0, 999.0, 1000.0, 1000.6, 1e9];
        for status in [StageStatus::Complete, StageStatus::InProgress, StageStatus::Pending] {
            for &budgeted in &amounts {
                for &actual in &amounts {
                    let p = analyzer.progress_percent(&Stage::new("S", budgeted, actual, status));
                    assert!(p <= 100, "status={} budgeted={} actual={}", status, budgeted, actual);
                }
            }
        }
    }

    #[test]
    fn test_preserves_stage_order() {
        let analyzer = StageVarianceAnalyzer::new();
        let stages = vec![
            Stage::new("Roofing", 9000.0, 0.0, StageStatus::Pending),
            Stage::new("Demo", 2000.0, 1900.0, StageStatus::Complete),
        ];
        let names: Vec<String> = analyzer.analyze(&stages).into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["Roofing".to_string(), "Demo".to_string()]);
    }
}
