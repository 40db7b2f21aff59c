use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATA_SOURCE: &str = "https://raw.githubusercontent.com/sakshamraj4/abinbev/main/test1.csv";

/// Environment variable overriding the stored data source
pub const SOURCE_ENV_VAR: &str = "FARM_DASHBOARD_SOURCE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV path or http(s) URL
    pub data_source: String,
    pub host: String,
    pub port: u16,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.into(),
            host: "127.0.0.1".into(),
            port: 8501,
            timeout_seconds: 30,
            user_agent: format!("farm-dashboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("farm-dashboard").join("config.json"))
    }

    /// Data source in effect: CLI flag, then environment, then stored value
    pub fn resolve_source(&self, flag: Option<&str>) -> String {
        if let Some(source) = flag.filter(|s| !s.trim().is_empty()) {
            return source.to_string();
        }
        match std::env::var(SOURCE_ENV_VAR) {
            Ok(source) if !source.trim().is_empty() => source,
            _ => self.data_source.clone(),
        }
    }

    pub fn set_data_source(&mut self, source: String) -> Result<()> {
        self.data_source = source;
        self.save()
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_seconds))
            .user_agent(self.user_agent.clone())
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);
        assert_eq!(config.port, 8501);
        assert!(config.user_agent.starts_with("farm-dashboard/"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);
    }

    #[test]
    fn test_flag_wins_over_stored_source() {
        let config = Config::default();
        assert_eq!(config.resolve_source(Some("data.csv")), "data.csv");
    }
}
