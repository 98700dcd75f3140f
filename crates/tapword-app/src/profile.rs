use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tapword_config::Config;

/// Root of per-user configuration
pub fn config_root() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("tapword"))
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Create the profiles folder and a default main profile if missing
pub fn init_user_config(root: &Path) -> anyhow::Result<PathBuf> {
    let dir = profiles_dir(root);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {dir:?}"))?;

    let main_profile = dir.join("main.json");
    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::default(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(main_profile)
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;
    let profile: Profile =
        serde_json::from_str(&data).with_context(|| format!("Invalid profile {path:?}"))?;
    Ok(profile.value)
}

/// Load a profile by name, falling back to main, then to built-in defaults
pub fn load_user_profile(root: &Path, name: &str) -> anyhow::Result<Config> {
    let dir = profiles_dir(root);
    let profile_file = dir.join(format!("{name}.json"));

    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
    let main_file = dir.join("main.json");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::default())
    }
}

/// Resolve the effective config: an explicit file wins over profiles.
/// Environment overrides are applied last.
pub fn load_config(explicit: Option<&Path>, root: &Path, profile: &str) -> anyhow::Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            let data =
                fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;
            serde_json::from_str(&data).with_context(|| format!("Invalid config {path:?}"))?
        }
        None => load_user_profile(root, profile)?,
    };

    config.apply_env();
    Ok(config)
}
