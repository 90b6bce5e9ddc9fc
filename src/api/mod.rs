// ==========================================
// 装修承包财务引擎 - API 层
// ==========================================
// 职责: 对展示层暴露的业务接口
// ==========================================

pub mod error;
pub mod financials_api;

pub use error::{ApiError, ApiResult};
pub use financials_api::ProjectFinancialsApi;
