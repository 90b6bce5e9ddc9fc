// ==========================================
// 装修承包财务引擎 - 财务绩效编排器
// ==========================================
// 职责: 边界校验 → 成本汇总 → 利润分级 / 挣值评估 → 阶段偏差 → 燃烧率预警
// 输入: 项目快照 (含阶段)
// 输出: DerivedResult (纯投影,幂等)
// ==========================================
// 红线: 引擎不做 I/O,不持有可变共享状态
// ==========================================

use crate::config::EngineConfig;
use crate::domain::error::DomainResult;
use crate::domain::financials::DerivedResult;
use crate::domain::project::Project;
use crate::engine::burn_rate::BurnRateNarrator;
use crate::engine::cost_aggregator::CostAggregator;
use crate::engine::earned_value::EarnedValueEvaluator;
use crate::engine::margin::MarginClassifier;
use crate::engine::stage_variance::StageVarianceAnalyzer;

// ==========================================
// FinancialEngine - 财务绩效引擎
// ==========================================
pub struct FinancialEngine {
    config: EngineConfig,
    cost_aggregator: CostAggregator,
    margin_classifier: MarginClassifier,
    earned_value_evaluator: EarnedValueEvaluator,
    stage_analyzer: StageVarianceAnalyzer,
    narrator: BurnRateNarrator,
}

impl FinancialEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - `config`: 引擎阈值配置 (由 ConfigManager 加载并校验)
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cost_aggregator: CostAggregator::new(),
            margin_classifier: MarginClassifier::new(config.danger_threshold_pct),
            earned_value_evaluator: EarnedValueEvaluator::new(config.cpi_ceiling),
            stage_analyzer: StageVarianceAnalyzer::new(),
            narrator: BurnRateNarrator::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cost_aggregator(&self) -> &CostAggregator {
        &self.cost_aggregator
    }

    /// 计算单个项目的财务投影
    ///
    /// # 返回
    /// - Ok(DerivedResult): 派生结果
    /// - Err(DomainError): 输入数据损坏 (负数/非有限值/重复阶段/缺少ID)
    pub fn evaluate(&self, project: &Project) -> DomainResult<DerivedResult> {
        if let Err(e) = project.validate() {
            tracing::warn!(project_id = %project.project_id, error = %e, "项目数据校验失败");
            return Err(e);
        }

        // 1. 成本汇总
        let total_cost_live = self.cost_aggregator.total_cost_live(project);

        // 2. 利润分级
        let margin = self.margin_classifier.classify(
            project.job_value,
            total_cost_live,
            project.estimated_margin_pct,
        );

        // 3. 挣值评估
        let earned_value = self.earned_value_evaluator.evaluate(
            project.job_value,
            project.percent_complete,
            project.percent_spent,
            project.schedule_performance_index,
        );

        // 4. 阶段偏差
        let stage_variances = self.stage_analyzer.analyze(&project.stages);

        // 5. 燃烧率预警
        let burn_warning = self.narrator.narrate(
            &margin,
            &stage_variances,
            total_cost_live,
            project.daily_labor_burn,
            project.days_remaining,
        );

        tracing::debug!(
            project_id = %project.project_id,
            total_cost_live,
            margin_pct = margin.margin_pct,
            margin_status = %margin.margin_status,
            cpi = earned_value.cpi,
            "项目财务评估完成"
        );

        if let Some(warning) = &burn_warning {
            tracing::warn!(project_id = %project.project_id, warning = %warning, "燃烧率预警");
        }

        Ok(DerivedResult {
            project_id: project.project_id.clone(),
            job_value: project.job_value,
            total_cost_live,
            margin,
            earned_value,
            stage_variances,
            daily_total_burn: project.daily_labor_burn + project.daily_material_burn,
            burn_warning,
        })
    }

    /// 批量计算 (遇到第一条损坏数据即返回错误)
    pub fn evaluate_all(&self, projects: &[Project]) -> DomainResult<Vec<DerivedResult>> {
        projects.iter().map(|p| self.evaluate(p)).collect()
    }
}

impl Default for FinancialEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::project::Stage;
    use crate::domain::types::{MarginStatus, StageStatus};

    fn create_test_project() -> Project {
        Project {
            project_id: "P-2024-031".to_string(),
            name: "Whole-home renovation".to_string(),
            job_value: 150000.0,
            estimated_margin_pct: 45.0,
            labor_cost_live: Some(42800.0),
            material_cost_live: Some(22600.0),
            sub_contract_cost: Some(7000.0),
            overhead_allocation: Some(4200.0),
            percent_complete: 55.0,
            percent_spent: 51.0,
            daily_labor_burn: 850.0,
            daily_material_burn: 400.0,
            days_remaining: 30,
            stages: vec![
                Stage::new("Demo", 8000.0, 7600.0, StageStatus::Complete),
                Stage::new("Framing", 14000.0, 15800.0, StageStatus::Complete),
                Stage::new("Electrical", 11000.0, 6000.0, StageStatus::InProgress),
                Stage::new("Tile", 12000.0, 0.0, StageStatus::Pending),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_evaluate_healthy_project() {
        let engine = FinancialEngine::default();
        let result = engine.evaluate(&create_test_project()).unwrap();

        assert_eq!(result.total_cost_live, 76600.0);
        assert_eq!(result.margin.margin_dollar, 73400.0);
        assert_eq!(result.margin.margin_status, MarginStatus::Healthy);
        assert_eq!(result.burn_warning, None);
        assert_eq!(result.stage_variances.len(), 4);
        assert_eq!(result.stage_variances[2].progress_percent, 55);
        assert_eq!(result.daily_total_burn, 1250.0);
    }

    #[test]
    fn test_evaluate_unhealthy_project_warns() {
        let engine = FinancialEngine::default();
        let mut project = create_test_project();
        project.estimated_margin_pct = 50.0;

        let result = engine.evaluate(&project).unwrap();
        assert_eq!(result.margin.margin_status, MarginStatus::Warning);
        assert_eq!(
            result.burn_warning.as_deref(),
            Some("You are burning cash on the Framing stage. Labor exceeded estimate by $1,800.")
        );
    }

    #[test]
    fn test_evaluate_rejects_corrupt_input() {
        let engine = FinancialEngine::default();
        let mut project = create_test_project();
        project.stages[1].actual = -5.0;

        assert!(matches!(
            engine.evaluate(&project),
            Err(DomainError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let engine = FinancialEngine::default();
        let project = create_test_project();

        let first = engine.evaluate(&project).unwrap();
        let second = engine.evaluate(&project).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_evaluate_all_stops_on_error() {
        let engine = FinancialEngine::default();
        let mut broken = create_test_project();
        broken.project_id = String::new();

        let result = engine.evaluate_all(&[create_test_project(), broken]);
        assert_eq!(result, Err(DomainError::MissingProjectId));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FinancialEngine>();
    }
}
