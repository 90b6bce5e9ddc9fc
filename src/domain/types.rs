// ==========================================
// 装修承包财务引擎 - 领域类型定义
// ==========================================
// 阶段状态 / 利润状态 / 成本绩效 / 成本类别
// ==========================================

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 阶段状态 (Stage Status)
// ==========================================
// 红线: 状态由外部系统提供,不由金额推断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Complete,   // 已完工
    InProgress, // 施工中
    Pending,    // 未开始
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StageStatus {
    /// 转换为外部系统使用的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Complete => "complete",
            StageStatus::InProgress => "in_progress",
            StageStatus::Pending => "pending",
        }
    }
}

impl FromStr for StageStatus {
    type Err = DomainError;

    /// 解析阶段状态
    ///
    /// 非法状态直接拒绝 (上游契约违反),不做兜底
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "complete" => Ok(StageStatus::Complete),
            "in_progress" => Ok(StageStatus::InProgress),
            "pending" => Ok(StageStatus::Pending),
            _ => Err(DomainError::InvalidStageStatus(s.to_string())),
        }
    }
}

// ==========================================
// 利润状态 (Margin Status)
// ==========================================
// 顺序: Healthy < Warning < Danger (用于风险排序)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginStatus {
    Healthy, // 达到或超过投标利润率
    Warning, // 低于目标,未到危险阈值
    Danger,  // 低于目标且缺口达到危险阈值
}

impl fmt::Display for MarginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginStatus::Healthy => write!(f, "healthy"),
            MarginStatus::Warning => write!(f, "warning"),
            MarginStatus::Danger => write!(f, "danger"),
        }
    }
}

impl MarginStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, MarginStatus::Healthy)
    }
}

// ==========================================
// 成本绩效分类 (CPI 判定)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostPerformance {
    Efficient, // CPI >= 1.0
    Overrun,   // CPI < 1.0
}

impl fmt::Display for CostPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostPerformance::Efficient => write!(f, "efficient"),
            CostPerformance::Overrun => write!(f, "overrun"),
        }
    }
}

// ==========================================
// CPI 取值依据
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpiBasis {
    Measured, // percent_complete / percent_spent
    Neutral,  // 无进度无花费,取 1.0
    Clamped,  // 取上界 (percent_spent == 0 且已有进度,或比值非有限)
}

// ==========================================
// 成本类别 (Cost Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCategory {
    Labor,       // 人工
    Material,    // 材料
    Subcontract, // 分包
    Overhead,    // 管理费分摊
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostCategory::Labor => write!(f, "labor"),
            CostCategory::Material => write!(f, "material"),
            CostCategory::Subcontract => write!(f, "subcontract"),
            CostCategory::Overhead => write!(f, "overhead"),
        }
    }
}

impl FromStr for CostCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "labor" => Ok(CostCategory::Labor),
            "material" => Ok(CostCategory::Material),
            "subcontract" | "sub_contract" => Ok(CostCategory::Subcontract),
            "overhead" => Ok(CostCategory::Overhead),
            _ => Err(DomainError::InvalidCostCategory(s.to_string())),
        }
    }
}
