// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod project_builder;

pub use project_builder::{kitchen_remodel_behind_target, whole_home_renovation, ProjectBuilder};
