use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

use crate::domain::error::Result;
use crate::domain::preview::DEFAULT_PREVIEW_LIMIT;

pub const CONFIG_FILE: &str = "tablepeek.toml";
pub const ENV_PREFIX: &str = "TABLEPEEK_";

/// Runtime settings.
///
/// | Source                     | Example                         |
/// |----------------------------|---------------------------------|
/// | built-in defaults          | `port = 3001`                   |
/// | `tablepeek.toml`           | `preview_limit = 20`            |
/// | `TABLEPEEK_*` env vars     | `TABLEPEEK_PORT=8080`           |
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    /// Records kept for display per upload
    #[validate(range(min = 1, max = 1000))]
    pub preview_limit: usize,

    /// Period of the elapsed-time counter while a file is decoding
    #[validate(range(min = 10, max = 60000))]
    pub tick_interval_ms: u64,

    #[validate(range(min = 1))]
    pub max_upload_bytes: usize,

    /// Entries kept by the in-memory activity log
    #[validate(range(min = 1, max = 10000))]
    pub log_buffer_size: usize,

    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,

    /// File previewed at startup, before any browser upload
    #[serde(default)]
    pub preload_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            tick_interval_ms: 1000,
            max_upload_bytes: 50 * 1024 * 1024,
            log_buffer_size: 100,
            log_filter: "info".to_string(),
            preload_file: None,
        }
    }
}

impl AppConfig {
    /// Load `.env`, then defaults < `tablepeek.toml` < `TABLEPEEK_*` env vars
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::from_figment(Figment::from(Serialized::defaults(
            AppConfig::default(),
        )))
        .unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.preview_limit, 10);
        assert_eq!(config.tick_interval().as_secs(), 1);
        assert!(config.preload_file.is_none());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string(
                "preview_limit = 25\nport = 8080\npreload_file = \"demo.csv\"",
            ));

        let config = AppConfig::from_figment(figment).unwrap();
        assert_eq!(config.preview_limit, 25);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.preload_file, Some(PathBuf::from("demo.csv")));
    }

    #[test]
    fn test_out_of_range_limit_is_rejected() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("preview_limit = 0"));

        let result = AppConfig::from_figment(figment);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("port = \"not a number\""));

        let result = AppConfig::from_figment(figment);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
