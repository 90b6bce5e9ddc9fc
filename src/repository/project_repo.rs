// ==========================================
// 装修承包财务引擎 - 项目数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 对外部记录系统的抽象 (提供项目/阶段/成本快照,接受更新)
// 实现: 内存仓储 (可由 JSON 快照文件初始化)
// ==========================================

use crate::domain::project::Project;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const ENTITY: &str = "Project";

// ==========================================
// ProjectRepository - 项目仓储接口
// ==========================================
pub trait ProjectRepository: Send + Sync {
    /// 按ID查询项目快照
    fn get_project(&self, project_id: &str) -> RepositoryResult<Project>;

    /// 查询全部项目 (按 project_id 排序)
    fn list_projects(&self) -> RepositoryResult<Vec<Project>>;

    /// 新增或覆盖项目快照
    fn upsert_project(&self, project: Project) -> RepositoryResult<()>;
}

// ==========================================
// InMemoryProjectRepository - 内存仓储
// ==========================================
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<BTreeMap<String, Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由项目列表初始化
    ///
    /// # 返回
    /// - Err(UniqueConstraintViolation): project_id 重复
    pub fn from_projects(projects: Vec<Project>) -> RepositoryResult<Self> {
        let repo = Self::new();
        for project in projects {
            repo.insert_project(project)?;
        }
        Ok(repo)
    }

    /// 由 JSON 快照文件初始化 (内容为项目数组)
    pub fn from_json_file(path: &Path) -> RepositoryResult<Self> {
        if !path.exists() {
            return Err(RepositoryError::DataSourceError(format!(
                "快照文件不存在: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path)?;
        let projects: Vec<Project> = serde_json::from_str(&raw)?;

        tracing::info!(path = %path.display(), count = projects.len(), "项目快照已加载");
        Self::from_projects(projects)
    }

    /// 新增项目 (ID 已存在时报错)
    pub fn insert_project(&self, project: Project) -> RepositoryResult<()> {
        let mut guard = self.write_guard()?;
        if guard.contains_key(&project.project_id) {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "project_id={}",
                project.project_id
            )));
        }
        guard.insert(project.project_id.clone(), project);
        Ok(())
    }

    pub fn len(&self) -> RepositoryResult<usize> {
        Ok(self.read_guard()?.len())
    }

    pub fn is_empty(&self) -> RepositoryResult<bool> {
        Ok(self.read_guard()?.is_empty())
    }

    fn read_guard(&self) -> RepositoryResult<RwLockReadGuard<'_, BTreeMap<String, Project>>> {
        self.projects
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn write_guard(&self) -> RepositoryResult<RwLockWriteGuard<'_, BTreeMap<String, Project>>> {
        self.projects
            .write()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn get_project(&self, project_id: &str) -> RepositoryResult<Project> {
        self.read_guard()?
            .get(project_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity: ENTITY.to_string(),
                id: project_id.to_string(),
            })
    }

    fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        Ok(self.read_guard()?.values().cloned().collect())
    }

    fn upsert_project(&self, project: Project) -> RepositoryResult<()> {
        if project.project_id.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "project_id 不能为空".to_string(),
            ));
        }
        self.write_guard()?.insert(project.project_id.clone(), project);
        Ok(())
    }
}
