// ==========================================
// 装修承包财务引擎 - 引擎阈值配置
// ==========================================
// 职责: 利润分级阈值、CPI 封顶值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// 引擎配置
///
/// 所有字段都有默认值,配置文件可只覆写其中一部分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// 危险阈值 (百分点): 利润率低于投标利润率的缺口达到该值即为 danger
    #[serde(default = "default_danger_threshold_pct")]
    pub danger_threshold_pct: f64,

    /// CPI 上界: percent_spent 为 0 但已有进度时使用 (实测 CPI 不受限制)
    #[serde(default = "default_cpi_ceiling")]
    pub cpi_ceiling: f64,
}

fn default_danger_threshold_pct() -> f64 {
    10.0
}

fn default_cpi_ceiling() -> f64 {
    10.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            danger_threshold_pct: default_danger_threshold_pct(),
            cpi_ceiling: default_cpi_ceiling(),
        }
    }
}

impl EngineConfig {
    /// 校验配置值
    ///
    /// # 规则
    /// - danger_threshold_pct: 有限且 > 0
    /// - cpi_ceiling: 有限且 >= 1.0
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.danger_threshold_pct.is_finite() || self.danger_threshold_pct <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "dangerThresholdPct".to_string(),
                message: format!("必须为正数, 实际 {}", self.danger_threshold_pct),
            });
        }

        if !self.cpi_ceiling.is_finite() || self.cpi_ceiling < 1.0 {
            return Err(ConfigError::InvalidValue {
                key: "cpiCeiling".to_string(),
                message: format!("必须 >= 1.0, 实际 {}", self.cpi_ceiling),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.danger_threshold_pct, 10.0);
        assert_eq!(config.cpi_ceiling, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"dangerThresholdPct": 5.0}"#).unwrap();
        assert_eq!(config.danger_threshold_pct, 5.0);
        assert_eq!(config.cpi_ceiling, 10.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EngineConfig {
            danger_threshold_pct: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "dangerThresholdPct"
        ));

        let config = EngineConfig {
            cpi_ceiling: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            cpi_ceiling: f64::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
