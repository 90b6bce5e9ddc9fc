// ==========================================
// 装修承包财务引擎 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 外部记录系统的抽象,引擎只读取一致快照
// ==========================================

pub mod error;
pub mod project_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use project_repo::{InMemoryProjectRepository, ProjectRepository};
