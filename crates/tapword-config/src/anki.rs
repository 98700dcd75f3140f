use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_deck() -> String {
    "Default".to_string()
}

fn default_model() -> String {
    "Basic".to_string()
}

/// Client-side flashcard forwarding, used with the direct contract only
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnkiConfig {
    pub enabled: bool,
    /// AnkiConnect URL
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_deck")]
    pub deck: String,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_url(),
            deck: default_deck(),
            model: default_model(),
        }
    }
}
