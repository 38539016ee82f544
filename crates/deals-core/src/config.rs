use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{DealsError, Result};

/// Top-level configuration for the deals assistant.
///
/// Loaded from `~/.deals/config.toml` by default. Missing sections and
/// fields fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealsConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl DealsConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DealsConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
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

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| DealsError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Where the product corpus comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Base URL of the deals backend.
    pub api_url: String,
    /// Local JSON snapshot. Takes precedence over `api_url` when set.
    pub file: Option<String>,
    /// Maximum number of products requested and kept.
    pub max_items: usize,
    /// Whole-request timeout for the bulk listing call.
    pub request_timeout_secs: u64,
    /// TCP connect timeout for the bulk listing call.
    pub connect_timeout_secs: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            file: None,
            max_items: 1000,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Chat assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the chat assistant accepts messages.
    pub enabled: bool,
    /// Artificial "thinking" pause before each answer, in milliseconds.
    pub thinking_delay_ms: u64,
    /// Maximum number of products listed in a reply.
    pub max_results: usize,
    /// Currency suffix shown after prices.
    pub currency: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thinking_delay_ms: 500,
            max_results: 8,
            currency: "Dhs".to_string(),
        }
    }
}
