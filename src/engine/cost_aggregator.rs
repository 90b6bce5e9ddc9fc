// ==========================================
// 装修承包财务引擎 - 成本汇总引擎
// ==========================================
// 职责: 人工/材料/分包/管理费 → 实际总成本
// 输入: 项目四项实时成本 或 原始成本流水
// 输出: CostBreakdown / total_cost_live
// ==========================================
// 红线: 缺失类别视为 0,不报错 (上游可能尚未过账)
// ==========================================

use crate::domain::project::{CostLineItem, Project};
use crate::domain::types::CostCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// CostBreakdown - 分类成本
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub labor: f64,
    pub material: f64,
    pub subcontract: f64,
    pub overhead: f64,
}

impl CostBreakdown {
    /// 总成本 = 人工 + 材料 + 分包 + 管理费
    pub fn total(&self) -> f64 {
        self.labor + self.material + self.subcontract + self.overhead
    }

    /// 按类别累加一笔金额
    pub fn add(&mut self, category: CostCategory, amount: f64) {
        match category {
            CostCategory::Labor => self.labor += amount,
            CostCategory::Material => self.material += amount,
            CostCategory::Subcontract => self.subcontract += amount,
            CostCategory::Overhead => self.overhead += amount,
        }
    }
}

// ==========================================
// CostAggregator - 成本汇总引擎
// ==========================================
pub struct CostAggregator {
    // 无状态引擎
}

impl CostAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 读取项目四项实时成本 (缺失视为 0)
    pub fn breakdown(&self, project: &Project) -> CostBreakdown {
        CostBreakdown {
            labor: project.labor_cost_live.unwrap_or(0.0),
            material: project.material_cost_live.unwrap_or(0.0),
            subcontract: project.sub_contract_cost.unwrap_or(0.0),
            overhead: project.overhead_allocation.unwrap_or(0.0),
        }
    }

    /// 实际总成本 (每次重新计算)
    pub fn total_cost_live(&self, project: &Project) -> f64 {
        self.breakdown(project).total()
    }

    /// 汇总指定项目的成本流水
    ///
    /// # 参数
    /// - `project_id`: 项目ID (其他项目的流水被忽略)
    /// - `items`: 原始成本流水
    pub fn aggregate_line_items(&self, project_id: &str, items: &[CostLineItem]) -> CostBreakdown {
        items
            .iter()
            .filter(|item| item.project_id == project_id)
            .fold(CostBreakdown::default(), |mut acc, item| {
                acc.add(item.category, item.amount);
                acc
            })
    }

    /// 按项目分组汇总成本流水 (按 project_id 排序,结果稳定)
    pub fn group_line_items(&self, items: &[CostLineItem]) -> BTreeMap<String, CostBreakdown> {
        let mut grouped: BTreeMap<String, CostBreakdown> = BTreeMap::new();
        for item in items {
            grouped
                .entry(item.project_id.clone())
                .or_default()
                .add(item.category, item.amount);
        }
        grouped
    }

    /// 用汇总结果覆写项目四项实时成本,返回新的项目快照
    pub fn apply_to_project(&self, project: &Project, breakdown: &CostBreakdown) -> Project {
        Project {
            labor_cost_live: Some(breakdown.labor),
            material_cost_live: Some(breakdown.material),
            sub_contract_cost: Some(breakdown.subcontract),
            overhead_allocation: Some(breakdown.overhead),
            ..project.clone()
        }
    }
}

impl Default for CostAggregator {
    fn default() -> Self {
        Self::new()
    }
}
