// ==========================================
// 装修承包财务引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、快照导出
// 优先级: 默认值 < 配置文件 < 环境变量
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};

// ==========================================
// 配置键 (环境变量名)
// ==========================================
pub mod config_keys {
    /// 危险阈值 (百分点)
    pub const DANGER_THRESHOLD_PCT: &str = "CONTRACTOR_PROFIT_DANGER_THRESHOLD_PCT";
    /// CPI 封顶值
    pub const CPI_CEILING: &str = "CONTRACTOR_PROFIT_CPI_CEILING";
}

/// 应用目录名 (位于系统配置目录下)
const APP_DIR_NAME: &str = "contractor-profit";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: EngineConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 仅使用默认值
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
            source: None,
        }
    }

    /// 加载配置 (默认值 → 文件 → 环境变量)
    ///
    /// # 参数
    /// - path: 显式配置文件路径;为 None 时尝试系统配置目录下的默认文件 (不存在则跳过)
    ///
    /// # 返回
    /// - Ok(ConfigManager): 已校验的配置
    /// - Err(ConfigError): 文件读取/解析失败或配置值非法
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// 加载配置,环境变量通过 lookup 读取
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        let mut config = match &source {
            Some(p) => read_config_file(p)?,
            None => EngineConfig::default(),
        };

        apply_env_overrides(&mut config, lookup);
        config.validate()?;

        tracing::debug!(
            source = ?source,
            danger_threshold_pct = config.danger_threshold_pct,
            cpi_ceiling = config.cpi_ceiling,
            "引擎配置已加载"
        );

        Ok(Self { config, source })
    }

    /// 当前配置
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 配置来源文件 (未使用文件时为 None)
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获取配置快照 (JSON格式),随报告一起记录
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        serde_json::to_string(&self.config).map_err(|e| ConfigError::Parse {
            path: "<snapshot>".to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// 默认配置文件路径: <config_dir>/contractor-profit/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn read_config_file(path: &Path) -> ConfigResult<EngineConfig> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// 环境变量覆写
///
/// 无法解析的值记录告警并忽略,保留原值
fn apply_env_overrides<F>(config: &mut EngineConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let overrides: [(&str, &mut f64); 2] = [
        (config_keys::DANGER_THRESHOLD_PCT, &mut config.danger_threshold_pct),
        (config_keys::CPI_CEILING, &mut config.cpi_ceiling),
    ];

    for (key, slot) in overrides {
        let Some(raw) = lookup(key) else {
            continue;
        };
        match raw.trim().parse::<f64>() {
            Ok(value) => *slot = value,
            Err(_) => {
                tracing::warn!(config_key = key, raw_value = %raw, "环境变量格式错误，忽略覆写");
            }
        }
    }
}
