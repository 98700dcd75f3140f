use serde::{Deserialize, Serialize};

fn default_margin() -> f64 {
    10.0
}

fn default_gap() -> f64 {
    8.0
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PopupConfig {
    /// Minimum distance kept between the popup and the viewport edges
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Space between the popup and the selection when flipped below it
    #[serde(default = "default_gap")]
    pub gap: f64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            gap: default_gap(),
        }
    }
}
