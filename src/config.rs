//! Configuration module
//!
//! Loads `AppConfig` from a TOML file. Every section and key is optional;
//! anything missing keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::catalog::{CatalogSettings, DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE};
use crate::application::services::SessionExpiryConfig;
use crate::infrastructure::formatting::CurrencyFormatter;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Default location: `~/.config/storefront/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storefront")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub currency: CurrencyConfig,
    pub sessions: SessionsConfig,
    pub orders: OrdersConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read the file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            page_size: self.catalog.page_size,
            max_visible_pages: self.catalog.max_visible_pages,
            detail_page: self.catalog.detail_page.clone(),
        }
    }

    pub fn price_formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::new(self.currency.symbol.clone(), self.currency.fraction_digits)
    }

    pub fn session_expiry(&self) -> SessionExpiryConfig {
        SessionExpiryConfig {
            sweep_interval_secs: self.sessions.sweep_interval_secs,
            idle_timeout_secs: self.sessions.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for graceful shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON array of products
    pub products_path: PathBuf,
    pub page_size: usize,
    pub max_visible_pages: usize,
    pub detail_page: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            products_path: PathBuf::from("products.json"),
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            detail_page: "product.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub symbol: String,
    pub fraction_digits: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: "₦".to_string(),
            fraction_digits: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        let expiry = SessionExpiryConfig::default();
        Self {
            idle_timeout_secs: expiry.idle_timeout_secs,
            sweep_interval_secs: expiry.sweep_interval_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    pub number_prefix: String,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            number_prefix: "COJJ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `storefront=debug,tower_http=info`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_storefront() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.catalog.page_size, 50);
        assert_eq!(cfg.catalog.max_visible_pages, 5);
        assert_eq!(cfg.currency.symbol, "₦");
        assert_eq!(cfg.orders.number_prefix, "COJJ");
        assert_eq!(cfg.api_address(), "0.0.0.0:8080");
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [catalog]
            page_size = 12
            products_path = "/srv/products.json"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.catalog.page_size, 12);
        assert_eq!(cfg.catalog.max_visible_pages, 5);
        assert_eq!(cfg.catalog.products_path, PathBuf::from("/srv/products.json"));
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.catalog_settings().page_size, 12);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[server\nport = ").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn default_path_ends_with_storefront_config() {
        assert!(default_config_path().ends_with("storefront/config.toml"));
    }
}
