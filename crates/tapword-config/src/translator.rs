use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which remote contract the translation client speaks. Only one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiContract {
    /// `POST /v1/translate` with an explicit language pair
    #[default]
    Direct,
    /// `POST /api/processTranslation`, languages fixed server-side, adds a flashcard
    Orchestrated,
}

impl FromStr for ApiContract {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(ApiContract::Direct),
            "orchestrated" | "backend" => Ok(ApiContract::Orchestrated),
            other => Err(ConfigError::UnknownContract(other.to_string())),
        }
    }
}

impl fmt::Display for ApiContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiContract::Direct => f.write_str("direct"),
            ApiContract::Orchestrated => f.write_str("orchestrated"),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_api_base() -> String {
    "http://localhost:8000".to_string()
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "ru".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Arm requests automatically when a phrase is shown
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub contract: ApiContract,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Upper bound on one request; a hung call becomes a failure
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            contract: ApiContract::default(),
            api_base: default_api_base(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl TranslatorConfig {
    /// Full endpoint URL for the configured contract
    pub fn endpoint(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        match self.contract {
            ApiContract::Direct => format!("{base}/v1/translate"),
            ApiContract::Orchestrated => format!("{base}/api/processTranslation"),
        }
    }
}
