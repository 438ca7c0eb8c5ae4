//! User configuration for handledeps.
//!
//! Settings that apply to every declaration file a user resolves live in
//! `~/.handledeps/config.toml` (`%LOCALAPPDATA%\handledeps\config.toml` on Windows).
//! A missing file is not an error; defaults are used instead.
//!
//! # File Format
//!
//! ```toml
//! # Version attached to handles declared without one
//! default_version = "6.4.2"
//!
//! # Group for handles declared without one
//! default_group = 0
//!
//! # Declaration file used when --manifest is not given
//! manifest = "assets/handles.toml"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::core::DepsError;

/// Name of the declaration file looked up in the working directory.
pub const DEFAULT_MANIFEST_NAME: &str = "handles.toml";

/// User-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DepsConfig {
    /// Version token for handles registered with the default version.
    ///
    /// With no default, such handles are emitted without a version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_version: Option<String>,

    /// Group for handles declared without one.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub default_group: u32,

    /// Declaration file to use when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

const fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl DepsConfig {
    /// Load from the default location, falling back to defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_or_default(&path).await
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// An explicitly given path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => Self::load().await,
        }
    }

    async fn load_or_default(path: &Path) -> Result<Self> {
        if fs::try_exists(path).await.unwrap_or(false) {
            Self::load_from(path).await
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DepsError::ConfigError`] for invalid TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self, DepsError> {
        toml::from_str(content).map_err(|e| DepsError::ConfigError {
            message: e.to_string().trim_end().to_string(),
        })
    }

    /// Write the configuration as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Platform-specific default config path.
    ///
    /// - **Windows**: `%LOCALAPPDATA%\handledeps\config.toml`
    /// - **Unix/macOS**: `~/.handledeps/config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("handledeps")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".handledeps")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Declaration file to load: the explicit path, then the configured one, then
    /// `handles.toml` in the working directory.
    #[must_use]
    pub fn manifest_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.manifest.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_NAME))
    }
}
