use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_min_scale() -> f32 {
    0.5
}

fn default_max_scale() -> f32 {
    3.0
}

fn default_scale_step() -> f32 {
    0.25
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ViewerConfig {
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
    #[serde(default = "default_scale_step")]
    pub scale_step: f32,
    /// Where page and zoom are persisted; user data dir when unset
    pub storage_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            scale_step: default_scale_step(),
            storage_path: None,
        }
    }
}
