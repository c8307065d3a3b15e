use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::catalog::CatalogConfig;
use self::speech::{CommandSpec, SpeechConfig};
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod catalog;
pub mod speech;
pub mod translator;
pub mod ui;

fn default_debounce_ms() -> u64 {
    1000
}

fn default_ack_ms() -> u64 {
    1000
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,
    pub catalog: CatalogConfig,

    /// Quiet period before auto-translate fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How long copy/share acknowledgments stay visible
    #[serde(default = "default_ack_ms")]
    pub ack_ms: u64,
    /// Native share program, clipboard fallback when unset
    pub share_command: Option<CommandSpec>,
}

impl Config {
    pub fn new() -> Self {
        let debounce_ms = env::var("DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_debounce_ms);

        Config {
            translator: TranslatorConfig::new(),
            speech: SpeechConfig::default(),
            ui: UiConfig::new(),
            catalog: CatalogConfig::default(),

            debounce_ms,
            ack_ms: default_ack_ms(),
            share_command: None,
        }
    }

    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            speech: SpeechConfig::default(),
            ui: UiConfig::default(),
            catalog: CatalogConfig::default(),
            debounce_ms: default_debounce_ms(),
            ack_ms: default_ack_ms(),
            share_command: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
