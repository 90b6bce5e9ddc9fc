// ==========================================
// 项目快照构建器 - 用于集成测试
// ==========================================

use contractor_profit::domain::project::{Project, Stage};
use contractor_profit::domain::types::StageStatus;

// ==========================================
// Project 构建器
// ==========================================

pub struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    pub fn new(project_id: &str) -> Self {
        Self {
            project: Project {
                project_id: project_id.to_string(),
                name: format!("Project {}", project_id),
                ..Default::default()
            },
        }
    }

    pub fn job_value(mut self, value: f64) -> Self {
        self.project.job_value = value;
        self
    }

    pub fn target_margin(mut self, pct: f64) -> Self {
        self.project.estimated_margin_pct = pct;
        self
    }

    /// 四项实时成本: 人工/材料/分包/管理费
    pub fn costs(mut self, labor: f64, material: f64, subcontract: f64, overhead: f64) -> Self {
        self.project.labor_cost_live = Some(labor);
        self.project.material_cost_live = Some(material);
        self.project.sub_contract_cost = Some(subcontract);
        self.project.overhead_allocation = Some(overhead);
        self
    }

    pub fn progress(mut self, percent_complete: f64, percent_spent: f64) -> Self {
        self.project.percent_complete = percent_complete;
        self.project.percent_spent = percent_spent;
        self
    }

    pub fn spi(mut self, spi: f64) -> Self {
        self.project.schedule_performance_index = Some(spi);
        self
    }

    pub fn burn(mut self, daily_labor: f64, daily_material: f64, days_remaining: u32) -> Self {
        self.project.daily_labor_burn = daily_labor;
        self.project.daily_material_burn = daily_material;
        self.project.days_remaining = days_remaining;
        self
    }

    pub fn stage(mut self, name: &str, budgeted: f64, actual: f64, status: StageStatus) -> Self {
        self.project
            .stages
            .push(Stage::new(name, budgeted, actual, status));
        self
    }

    pub fn build(self) -> Project {
        self.project
    }
}

// ==========================================
// 标准测试项目
// ==========================================

/// 全屋翻新项目 (合同 150000,实际成本 76600)
pub fn whole_home_renovation() -> Project {
    ProjectBuilder::new("P-2024-031")
        .job_value(150000.0)
        .target_margin(45.0)
        .costs(42800.0, 22600.0, 7000.0, 4200.0)
        .progress(55.0, 51.0)
        .burn(850.0, 400.0, 30)
        .stage("Demo", 8000.0, 7600.0, StageStatus::Complete)
        .stage("Framing", 14000.0, 15800.0, StageStatus::Complete)
        .stage("Electrical", 11000.0, 6000.0, StageStatus::InProgress)
        .stage("Tile", 12000.0, 0.0, StageStatus::Pending)
        .build()
}

/// 厨房改造项目 (利润 39.3%,目标 45%)
pub fn kitchen_remodel_behind_target() -> Project {
    ProjectBuilder::new("P-2024-044")
        .job_value(100000.0)
        .target_margin(45.0)
        .costs(35000.0, 18000.0, 5000.0, 2700.0)
        .progress(60.0, 64.0)
        .burn(700.0, 300.0, 25)
        .stage("Demo", 6000.0, 5800.0, StageStatus::Complete)
        .stage("Cabinets", 30000.0, 20000.0, StageStatus::InProgress)
        .stage("Counters", 20000.0, 0.0, StageStatus::Pending)
        .build()
}
