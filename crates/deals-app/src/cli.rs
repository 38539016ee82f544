//! CLI argument definitions for the `deals` binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use deals_core::config::DealsConfig;
use deals_core::error::DealsError;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "DEALS_CONFIG";

/// Ask for electronics deals in plain language.
#[derive(Parser, Debug)]
#[command(name = "deals", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Base URL of the deals backend.
    #[arg(short = 'u', long = "api-url")]
    pub api_url: Option<String>,

    /// Load the catalogue from a JSON snapshot instead of the backend.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive chat over stdin (default).
    Chat,
    /// Answer a single request and exit.
    Ask {
        /// The request, e.g. "Samsung phones under 3000".
        #[arg(required = true, num_args = 1..)]
        utterance: Vec<String>,
    },
    /// Print catalogue statistics.
    Stats,
    /// Print the highest scoring deals.
    TopDeals {
        /// Number of deals to show.
        #[arg(short = 'n', long = "limit", default_value_t = 5,
              value_parser = clap::value_parser!(u16).range(1..=20))]
        limit: u16,
    },
}

impl CliArgs {
    /// The subcommand to run, defaulting to interactive chat.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > DEALS_CONFIG env var > ~/.deals/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Read the configuration file and apply CLI overrides.
    ///
    /// Falls back to defaults when the file is missing or invalid. The error
    /// is returned rather than logged, since logging is not set up yet.
    pub fn load_config(&self) -> LoadedConfig {
        let path = self.resolve_config_path();
        let (mut config, error) = match DealsConfig::load(&path) {
            Ok(config) => (config, None),
            Err(e) => (DealsConfig::default(), Some(e)),
        };
        self.apply_overrides(&mut config);
        LoadedConfig {
            path,
            config,
            error,
        }
    }

    /// Apply corpus overrides from the command line onto `config`.
    pub fn apply_overrides(&self, config: &mut DealsConfig) {
        if let Some(ref url) = self.api_url {
            config.corpus.api_url = url.clone();
        }
        if let Some(ref file) = self.file {
            config.corpus.file = Some(file.to_string_lossy().to_string());
        }
    }
}

/// Configuration read at startup, with the load error kept for logging.
#[derive(Debug)]
pub struct LoadedConfig {
    pub path: PathBuf,
    /// File contents with CLI overrides applied, or defaults on error.
    pub config: DealsConfig,
    pub error: Option<DealsError>,
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".deals").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".deals").join("config.toml");
    }
    PathBuf::from("config.toml")
}
