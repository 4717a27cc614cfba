use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{KisanError, Result};

/// Top-level configuration for the Kisan assistant.
///
/// Loaded from `~/.kisan/config.toml` by default. Every section falls back
/// to its defaults when omitted, so an empty file is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KisanConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

impl KisanConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: KisanConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or unparseable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| KisanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Full path of the SQLite database file, with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_home(&self.general.data_dir).join(&self.storage.database_file)
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory holding the key-value database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Default reply language code (en, hi, pa, mr, te, ta, kn).
    pub language: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.kisan/data".to_string(),
            log_level: "info".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Local persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File name of the SQLite key-value store inside `data_dir`.
    pub database_file: String,
    /// Insert seed listings and posts into empty collections on open.
    pub seed_on_open: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_file: "kisan.db".to_string(),
            seed_on_open: true,
        }
    }
}

/// Simulated network latency for the account flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub login_delay_ms: u64,
    pub reset_delay_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: 800,
            reset_delay_ms: 1000,
        }
    }
}

/// Model selection for each class of advisor call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Multimodal model for image diagnosis, soil analysis and schemes.
    pub vision_model: String,
    /// Low-latency model for short text advice.
    pub fast_model: String,
    /// Model backing multi-turn chat sessions.
    pub chat_model: String,
    /// Model used for web-grounded searches.
    pub search_model: String,
    pub diagnosis_temperature: f32,
    pub advice_temperature: f32,
    pub insight_temperature: f32,
    pub listing_temperature: f32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            vision_model: "gemini-2.5-flash".to_string(),
            fast_model: "gemini-2.5-flash-lite".to_string(),
            chat_model: "gemini-3-pro-preview".to_string(),
            search_model: "gemini-2.5-flash".to_string(),
            diagnosis_temperature: 0.4,
            advice_temperature: 0.3,
            insight_temperature: 0.5,
            listing_temperature: 0.7,
        }
    }
}

/// Resolve the config file path.
///
/// Priority: explicit path > `KISAN_CONFIG` env var > `~/.kisan/config.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    if let Ok(p) = std::env::var("KISAN_CONFIG") {
        return PathBuf::from(p);
    }
    expand_home("~/.kisan/config.toml")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}
