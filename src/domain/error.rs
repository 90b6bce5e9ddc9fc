// ==========================================
// 装修承包财务引擎 - 领域层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 区分: 合法缺失数据 (默认为 0) vs 损坏数据 (直接拒绝)
// ==========================================

use thiserror::Error;

/// 领域层错误类型 (输入边界校验)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    // ===== 枚举值错误 =====
    #[error("非法阶段状态: {0} (允许: complete/in_progress/pending)")]
    InvalidStageStatus(String),

    #[error("非法成本类别: {0} (允许: labor/material/subcontract/overhead)")]
    InvalidCostCategory(String),

    // ===== 数值错误 =====
    #[error("数值非法 (field={field}): {value}")]
    InvalidAmount { field: String, value: f64 },

    #[error("百分比超出范围 [0, 100] (field={field}): {value}")]
    PercentOutOfRange { field: String, value: f64 },

    // ===== 结构错误 =====
    #[error("项目缺少 project_id")]
    MissingProjectId,

    #[error("阶段名称重复: project_id={project_id}, stage={stage}")]
    DuplicateStage { project_id: String, stage: String },
}

/// Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
