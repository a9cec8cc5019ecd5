//! 配置文件加载与保存
//!
//! 只存设置（货币代码、默认小费档位），不存任何计算状态。
//! 文件不存在时写入一份默认配置，方便用户手工修改。

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_TIP, TIP_PERCENTAGES};
use crate::money::detect_currency_code;

/// TOML 配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub meta: ConfigMeta,
    /// ISO 货币代码，只影响显示
    pub currency: String,
    /// 启动时的默认小费比例
    pub default_tip: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMeta {
    pub version: String,
    pub created_at: DateTime<Local>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: ConfigMeta {
                version: "1.0".to_string(),
                created_at: Local::now(),
            },
            currency: detect_currency_code(),
            default_tip: DEFAULT_TIP,
        }
    }
}

impl Config {
    /// 配置里的默认小费；不在档位表中时回退到 20% 并记一条警告
    pub fn effective_default_tip(&self) -> u32 {
        if TIP_PERCENTAGES.contains(&self.default_tip) {
            self.default_tip
        } else {
            tracing::warn!(
                tip = self.default_tip,
                "配置的默认小费不在档位表中，回退到 {}%",
                DEFAULT_TIP
            );
            DEFAULT_TIP
        }
    }
}

/// 从 TOML 文件加载配置；文件不存在时写入并返回默认配置
pub fn load_config(path: &Path) -> io::Result<Config> {
    if !path.exists() {
        let config = Config::default();
        save_config(&config, path)?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)?;
    let config: Config =
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(config)
}

/// 保存配置到 TOML 文件
pub fn save_config(config: &Config, path: &Path) -> io::Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_set_default_tip_is_kept() {
        let mut config = Config::default();
        config.default_tip = 25;
        assert_eq!(config.effective_default_tip(), 25);
    }

    #[test]
    fn out_of_set_default_tip_falls_back() {
        let mut config = Config::default();
        config.default_tip = 17;
        assert_eq!(config.effective_default_tip(), DEFAULT_TIP);
    }

    #[test]
    fn config_survives_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.currency, config.currency);
        assert_eq!(parsed.default_tip, config.default_tip);
        assert_eq!(parsed.meta.version, config.meta.version);
    }
}
