use std::env;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE: &str = "en-GB";
pub const DEFAULT_TARGET: &str = "es-ES";

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_source")]
    pub default_source: String,
    #[serde(default = "default_target")]
    pub default_target: String,
    /// Theme flag file, platform data dir when unset
    #[serde(default)]
    pub theme_path: Option<String>,
}

impl UiConfig {
    pub fn new() -> Self {
        Self {
            theme_path: env::var("PARLEY_THEME_PATH").ok().filter(|v| !v.is_empty()),
            ..Self::default()
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_source: default_source(),
            default_target: default_target(),
            theme_path: None,
        }
    }
}
