use serde::{Deserialize, Serialize};
use tapword_types::ThemeColors;

fn default_haptics() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HostConfig {
    /// Running embedded in a chat-app mini-app host
    pub enabled: bool,
    /// Theme reported by the host; popup falls back to defaults when unset
    pub theme: Option<ThemeColors>,
    #[serde(default = "default_haptics")]
    pub haptics: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            theme: None,
            haptics: default_haptics(),
        }
    }
}
