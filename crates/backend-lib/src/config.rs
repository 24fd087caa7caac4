// ============================
// catalog-backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// Prefix of environment overrides, e.g. `CATALOG__AUTH__TOKEN_SECRET`
pub const ENV_PREFIX: &str = "CATALOG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// bcrypt cost bounds; 10 matches the rounds existing hashes were made with
pub const DEFAULT_HASH_COST: u32 = 10;
const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Config error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub products: ProductSettings,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory holding one JSON file per collection (file backend only)
    pub path: PathBuf,
}

/// Credential settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// HMAC secret used to sign and verify tokens
    pub token_secret: String,
    /// bcrypt cost factor
    pub hash_cost: u32,
    /// Token lifetime. `None` issues tokens without an `exp` claim.
    pub token_ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductSettings {
    /// Answer update/delete of an unknown id with 404 instead of `null`/204
    pub strict_missing_ids: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            auth: AuthSettings::default(),
            products: ProductSettings::default(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from("data"),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_secret: "change-me".to_string(),
            hash_cost: DEFAULT_HASH_COST,
            token_ttl_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from `config/default.*` (if present) and the environment
    pub fn load() -> Result<Self, SettingsError> {
        Self::build(File::with_name("config/default").required(false))
    }

    /// Load settings from an explicit file, then the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Self::build(File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, SettingsError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(SettingsError::Invalid(format!(
                "log_level must be one of {LOG_LEVELS:?}, got {:?}",
                self.log_level
            )));
        }
        if !LOG_FORMATS.contains(&self.log_format.as_str()) {
            return Err(SettingsError::Invalid(format!(
                "log_format must be one of {LOG_FORMATS:?}, got {:?}",
                self.log_format
            )));
        }
        if self.server.port == 0 {
            return Err(SettingsError::Invalid("server.port must not be 0".into()));
        }
        if self.auth.token_secret.is_empty() {
            return Err(SettingsError::Invalid(
                "auth.token_secret must not be empty".into(),
            ));
        }
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.auth.hash_cost) {
            return Err(SettingsError::Invalid(format!(
                "auth.hash_cost must be within {MIN_HASH_COST}..={MAX_HASH_COST}, got {}",
                self.auth.hash_cost
            )));
        }
        if self.auth.token_ttl_secs == Some(0) {
            return Err(SettingsError::Invalid(
                "auth.token_ttl_secs must be positive when set".into(),
            ));
        }
        Ok(())
    }

    /// Resolve `server.host:server.port`
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()
            .map_err(|e| SettingsError::Invalid(format!("server.host: {e}")))?
            .next()
            .ok_or_else(|| {
                SettingsError::Invalid(format!(
                    "server.host {:?} did not resolve",
                    self.server.host
                ))
            })
    }
}
