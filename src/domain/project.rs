// ==========================================
// 装修承包财务引擎 - 项目/阶段领域模型
// ==========================================
// 职责: 定义项目、阶段、成本流水实体及边界校验
// 红线: 进度百分比与成本字段相互独立,不做一致性修正
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::types::{CostCategory, StageStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// Project - 承包项目
// ==========================================
// 用途: 引擎输入快照 (由外部记录系统提供)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: String,            // 项目ID
    #[serde(default)]
    pub name: String,                  // 项目名称

    // ===== 合同与目标 =====
    pub job_value: f64,                // 合同价
    #[serde(default)]
    pub estimated_margin_pct: f64,     // 投标利润率 (0-100)

    // ===== 实际成本 (缺失视为 0) =====
    #[serde(default)]
    pub labor_cost_live: Option<f64>,     // 人工
    #[serde(default)]
    pub material_cost_live: Option<f64>,  // 材料
    #[serde(default)]
    pub sub_contract_cost: Option<f64>,   // 分包
    #[serde(default)]
    pub overhead_allocation: Option<f64>, // 管理费分摊

    // ===== 进度 (来自计量/开票系统,与成本字段解耦) =====
    #[serde(default)]
    pub percent_complete: f64,         // 完工百分比 (0-100)
    #[serde(default)]
    pub percent_spent: f64,            // 花费百分比 (0-100)
    #[serde(default)]
    pub schedule_performance_index: Option<f64>, // SPI (外部基线计算)

    // ===== 燃烧率 =====
    #[serde(default)]
    pub daily_labor_burn: f64,         // 日均人工支出
    #[serde(default)]
    pub daily_material_burn: f64,      // 日均材料支出
    #[serde(default)]
    pub days_remaining: u32,           // 剩余计划工期 (天)

    // ===== 阶段 (展示/工作流顺序) =====
    #[serde(default)]
    pub stages: Vec<Stage>,
}

// ==========================================
// Stage - 预算阶段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub name: String,        // 阶段名称 (项目内唯一)
    pub budgeted: f64,       // 预算
    #[serde(default)]
    pub actual: f64,         // 实际发生 (0 = 未开工)
    pub status: StageStatus, // 外部提供的权威状态
}

impl Stage {
    pub fn new(name: &str, budgeted: f64, actual: f64, status: StageStatus) -> Self {
        Self {
            name: name.to_string(),
            budgeted,
            actual,
            status,
        }
    }
}

// ==========================================
// CostLineItem - 成本流水
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLineItem {
    pub project_id: String,
    pub category: CostCategory,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl Project {
    /// 边界校验
    ///
    /// # 规则
    /// - project_id 不能为空
    /// - 金额/燃烧率必须为有限非负数
    /// - 投标利润率/完工百分比/花费百分比必须在 [0, 100] 内
    /// - 阶段名称在项目内唯一
    ///
    /// SPI 为外部不透明输入,不在此校验 (非有限值由引擎按中性处理)
    pub fn validate(&self) -> DomainResult<()> {
        if self.project_id.trim().is_empty() {
            return Err(DomainError::MissingProjectId);
        }

        check_amount("jobValue", self.job_value)?;
        check_percent("estimatedMarginPct", self.estimated_margin_pct)?;
        check_percent("percentComplete", self.percent_complete)?;
        check_percent("percentSpent", self.percent_spent)?;
        check_amount("dailyLaborBurn", self.daily_labor_burn)?;
        check_amount("dailyMaterialBurn", self.daily_material_burn)?;

        let optional_costs = [
            ("laborCostLive", self.labor_cost_live),
            ("materialCostLive", self.material_cost_live),
            ("subContractCost", self.sub_contract_cost),
            ("overheadAllocation", self.overhead_allocation),
        ];
        for (field, value) in optional_costs {
            if let Some(v) = value {
                check_amount(field, v)?;
            }
        }

        let mut seen = HashSet::new();
        for stage in &self.stages {
            check_amount(&format!("stages[{}].budgeted", stage.name), stage.budgeted)?;
            check_amount(&format!("stages[{}].actual", stage.name), stage.actual)?;

            if !seen.insert(stage.name.as_str()) {
                return Err(DomainError::DuplicateStage {
                    project_id: self.project_id.clone(),
                    stage: stage.name.clone(),
                });
            }
        }

        Ok(())
    }
}

fn check_amount(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::InvalidAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_percent(field: &str, value: f64) -> DomainResult<()> {
    check_amount(field, value)?;
    if value > 100.0 {
        return Err(DomainError::PercentOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_project() -> Project {
        Project {
            project_id: "P-100".to_string(),
            name: "Kitchen Remodel".to_string(),
            job_value: 50000.0,
            estimated_margin_pct: 30.0,
            labor_cost_live: Some(12000.0),
            material_cost_live: Some(8000.0),
            percent_complete: 40.0,
            percent_spent: 42.0,
            stages: vec![
                Stage::new("Demo", 5000.0, 5200.0, StageStatus::Complete),
                Stage::new("Cabinets", 15000.0, 0.0, StageStatus::Pending),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(create_test_project().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_id() {
        let mut project = create_test_project();
        project.project_id = "  ".to_string();
        assert_eq!(project.validate(), Err(DomainError::MissingProjectId));
    }

    #[test]
    fn test_validate_negative_cost() {
        let mut project = create_test_project();
        project.overhead_allocation = Some(-1.0);
        let err = project.validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount { ref field, .. } if field == "overheadAllocation"));
    }

    #[test]
    fn test_validate_non_finite() {
        let mut project = create_test_project();
        project.percent_spent = f64::NAN;
        assert!(project.validate().is_err());

        let mut project = create_test_project();
        project.job_value = f64::INFINITY;
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_validate_percent_range() {
        let mut project = create_test_project();
        project.percent_complete = 100.0;
        project.estimated_margin_pct = 0.0;
        assert!(project.validate().is_ok());

        let mut project = create_test_project();
        project.percent_spent = 150.0;
        let err = project.validate().unwrap_err();
        assert!(matches!(err, DomainError::PercentOutOfRange { ref field, .. } if field == "percentSpent"));

        let mut project = create_test_project();
        project.estimated_margin_pct = 100.5;
        let err = project.validate().unwrap_err();
        assert!(matches!(err, DomainError::PercentOutOfRange { ref field, .. } if field == "estimatedMarginPct"));

        let mut project = create_test_project();
        project.percent_complete = -1.0;
        let err = project.validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount { ref field, .. } if field == "percentComplete"));
    }

    #[test]
    fn test_validate_duplicate_stage() {
        let mut project = create_test_project();
        project
            .stages
            .push(Stage::new("Demo", 100.0, 0.0, StageStatus::Pending));
        let err = project.validate().unwrap_err();
        assert!(matches!(err, DomainError::DuplicateStage { ref stage, .. } if stage == "Demo"));
    }

    #[test]
    fn test_deserialize_missing_costs_default_to_none() {
        let json = r#"{
            "projectId": "P-1",
            "jobValue": 1000.0,
            "stages": [{"name": "Drywall", "budgeted": 500.0, "status": "in_progress"}]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.labor_cost_live, None);
        assert_eq!(project.stages[0].actual, 0.0);
        assert_eq!(project.stages[0].status, StageStatus::InProgress);
    }

    #[test]
    fn test_deserialize_rejects_bad_status() {
        let json = r#"{
            "projectId": "P-1",
            "jobValue": 1000.0,
            "stages": [{"name": "Drywall", "budgeted": 500.0, "status": "started"}]
        }"#;
        let result: Result<Project, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
