// ==========================================
// 装修承包财务引擎 - 项目财务 API
// ==========================================
// 职责: 仓储读取 → 引擎计算 → 带报告ID/时间戳的报告
// 架构: API 层 → Engine 层 (纯计算) / Repository 层 (外部记录系统)
// ==========================================

use std::path::Path;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::financials::{FinancialReport, PortfolioSummary};
use crate::domain::project::CostLineItem;
use crate::engine::{FinancialEngine, PortfolioEngine};
use crate::importer::CostLineImporter;
use crate::repository::ProjectRepository;

// ==========================================
// ProjectFinancialsApi - 项目财务 API
// ==========================================

/// 项目财务API
///
/// 职责：
/// 1. 单项目财务报告 (利润/挣值/阶段偏差/燃烧率预警)
/// 2. 项目组合汇总与风险排序
/// 3. 成本流水回写 (汇总后覆写项目四项实时成本)
pub struct ProjectFinancialsApi {
    project_repo: Arc<dyn ProjectRepository>,
    engine: Arc<FinancialEngine>,
    portfolio_engine: PortfolioEngine,
    importer: CostLineImporter,
}

impl ProjectFinancialsApi {
    /// 创建新的ProjectFinancialsApi实例
    ///
    /// # 参数
    /// - project_repo: 项目仓储
    /// - engine: 财务绩效引擎 (可跨线程共享)
    pub fn new(project_repo: Arc<dyn ProjectRepository>, engine: Arc<FinancialEngine>) -> Self {
        Self {
            project_repo,
            engine,
            portfolio_engine: PortfolioEngine::new(),
            importer: CostLineImporter::new(),
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询单个项目的财务报告
    ///
    /// # 返回
    /// - Ok(FinancialReport): 报告 (每次重新计算)
    /// - Err(ApiError::NotFound): 项目不存在
    /// - Err(ApiError::ValidationError): 项目数据损坏
    pub fn get_project_financials(&self, project_id: &str) -> ApiResult<FinancialReport> {
        if project_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("项目ID不能为空".to_string()));
        }

        let project = self.project_repo.get_project(project_id)?;
        let result = self.engine.evaluate(&project)?;

        Ok(FinancialReport::new(result))
    }

    /// 查询全部项目的财务报告 (按 project_id 排序)
    pub fn list_project_financials(&self) -> ApiResult<Vec<FinancialReport>> {
        let projects = self.project_repo.list_projects()?;
        let results = self.engine.evaluate_all(&projects)?;

        tracing::info!(count = results.len(), "项目财务报告生成完成");
        Ok(results.into_iter().map(FinancialReport::new).collect())
    }

    /// 项目组合汇总
    pub fn get_portfolio_overview(&self) -> ApiResult<PortfolioSummary> {
        let projects = self.project_repo.list_projects()?;
        let results = self.engine.evaluate_all(&projects)?;
        Ok(self.portfolio_engine.summarize(&results))
    }

    // ==========================================
    // 成本流水回写
    // ==========================================

    /// 汇总成本流水并覆写对应项目的四项实时成本
    ///
    /// # 返回
    /// - Ok(usize): 更新的项目数
    /// - Err(ApiError::NotFound): 流水引用了不存在的项目 (此时不做任何更新)
    pub fn apply_cost_line_items(&self, items: &[CostLineItem]) -> ApiResult<usize> {
        let aggregator = self.engine.cost_aggregator();
        let grouped = aggregator.group_line_items(items);

        // 先全部读取,确保全部项目存在后再写入
        let mut updated = Vec::with_capacity(grouped.len());
        for (project_id, breakdown) in &grouped {
            let project = self.project_repo.get_project(project_id)?;
            updated.push(aggregator.apply_to_project(&project, breakdown));
        }

        let count = updated.len();
        for project in updated {
            self.project_repo.upsert_project(project)?;
        }

        tracing::info!(line_items = items.len(), projects = count, "成本流水已回写");
        Ok(count)
    }

    /// 从 CSV 导入成本流水并回写
    pub fn import_cost_csv(&self, path: &Path) -> ApiResult<usize> {
        let items = self.importer.import_csv(path)?;
        self.apply_cost_line_items(&items)
    }
}
