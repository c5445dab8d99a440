use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, Result};

const APP_DIR: &str = "reva-wellness";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// Number of most recent logs plotted on the dashboard.
    #[serde(default = "default_trend_points")]
    pub trend_points: usize,
}

fn data_dir() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR);
    std::fs::create_dir_all(&data_dir).ok();
    data_dir
}

fn default_db_path() -> String {
    data_dir().join("reva.db").to_string_lossy().to_string()
}

fn default_export_dir() -> String {
    data_dir().to_string_lossy().to_string()
}

fn default_trend_points() -> usize {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            export_dir: default_export_dir(),
            trend_points: default_trend_points(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    pub fn export_path(&self) -> PathBuf {
        PathBuf::from(&self.export_dir).join("reva_logs.csv")
    }

    fn validate(&self) -> Result<()> {
        if self.trend_points == 0 {
            return Err(AppError::Config(
                "trend_points must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
