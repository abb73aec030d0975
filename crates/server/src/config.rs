//! Service configuration

use anyhow::{Context, Result};
use planner_lib::{contact::DEFAULT_MAX_RECORDS, SizingConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an optional config file
pub const CONFIG_FILE_ENV: &str = "HEXACRAFT_CONFIG";

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Name attached to structured log records
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// HTTP listen port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// JSON catalog file; the built-in price list is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Comma-separated allowed CORS origins, `*` for any
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,

    /// Webhook receiving accepted contact messages
    #[serde(default)]
    pub contact_webhook_url: Option<String>,

    /// Contact messages kept in memory; the oldest are dropped first
    #[serde(default = "default_contact_max_records")]
    pub contact_max_records: usize,

    /// Recommendation engine constants
    #[serde(default)]
    pub sizing: SizingConfig,
}

fn default_service_name() -> String {
    "hexacraft-api".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_cors_origins() -> String {
    "*".to_string()
}

fn default_contact_max_records() -> usize {
    DEFAULT_MAX_RECORDS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            api_port: default_api_port(),
            catalog_path: None,
            cors_origins: default_cors_origins(),
            contact_webhook_url: None,
            contact_max_records: default_contact_max_records(),
            sizing: SizingConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the optional config file and the environment
    pub fn load() -> Result<Self> {
        let file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);
        Self::load_from(file.as_deref())
    }

    /// Load with an explicit config file; `HEXACRAFT_*` variables override it
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("HEXACRAFT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Allowed origins, trimmed, empty entries dropped
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Environment variables are process-wide; tests that load config
    // hold this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.cors_origin_list(), vec!["*".to_string()]);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.sizing, SizingConfig::default());
        assert_eq!(config.contact_max_records, DEFAULT_MAX_RECORDS);
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
api_port = 9001
cors_origins = "https://hexacraft.example, https://www.hexacraft.example"
contact_webhook_url = "http://inbox.internal/hook"

[sizing]
base_ram_mb = 2048

[sizing.modded]
ram_per_player_mb = 300
cpu_per_player_centi_pct = 250
"#
        )
        .unwrap();

        let config = ServiceConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.api_port, 9001);
        assert_eq!(config.service_name, "hexacraft-api");
        assert_eq!(
            config.cors_origin_list(),
            vec![
                "https://hexacraft.example".to_string(),
                "https://www.hexacraft.example".to_string()
            ]
        );
        assert_eq!(
            config.contact_webhook_url.as_deref(),
            Some("http://inbox.internal/hook")
        );
        assert_eq!(config.sizing.base_ram_mb, 2048);
        assert_eq!(config.sizing.modded.ram_per_player_mb, 300);
        assert_eq!(config.sizing.vanilla, SizingConfig::default().vanilla);
    }

    #[test]
    fn test_missing_file_is_error() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceConfig::load_from(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
api_port = 9001
contact_max_records = 10

[sizing]
base_ram_mb = 2048
"#
        )
        .unwrap();

        std::env::set_var("HEXACRAFT_API_PORT", "9100");
        std::env::set_var("HEXACRAFT_SIZING__BASE_RAM_MB", "1536");
        std::env::set_var("HEXACRAFT_SIZING__VANILLA__RAM_PER_PLAYER_MB", "80");
        std::env::set_var("HEXACRAFT_SIZING__VANILLA__CPU_PER_PLAYER_CENTI_PCT", "60");
        let result = ServiceConfig::load_from(Some(file.path()));
        std::env::remove_var("HEXACRAFT_API_PORT");
        std::env::remove_var("HEXACRAFT_SIZING__BASE_RAM_MB");
        std::env::remove_var("HEXACRAFT_SIZING__VANILLA__RAM_PER_PLAYER_MB");
        std::env::remove_var("HEXACRAFT_SIZING__VANILLA__CPU_PER_PLAYER_CENTI_PCT");

        let config = result.unwrap();
        assert_eq!(config.api_port, 9100);
        assert_eq!(config.sizing.base_ram_mb, 1536);
        assert_eq!(config.sizing.vanilla.ram_per_player_mb, 80);
        assert_eq!(config.sizing.vanilla.cpu_per_player_centi_pct, 60);
        assert_eq!(config.sizing.modded, SizingConfig::default().modded);
        assert_eq!(config.contact_max_records, 10);
    }
}
