use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_provider() -> String {
    "mymemory".to_string()
}

fn default_api_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Contact address sent as `de`, raises the MyMemory daily quota
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let api_url = env::var("PARLEY_API_URL").unwrap_or_else(|_| default_api_url());
        let email = env::var("PARLEY_API_EMAIL").ok().filter(|v| !v.is_empty());
        let timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        Self {
            api_url,
            email,
            timeout_seconds,
            ..Self::default()
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: default_provider(),
            api_url: default_api_url(),
            email: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
