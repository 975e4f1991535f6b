use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use reo_config::Config;
use reo_config::ui::Theme;
use serde::{Deserialize, Serialize};

/// `~/.config/reo` or the platform equivalent
pub fn reo_root() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir().context("No config directory for this user")?;
    Ok(config_dir.join("reo"))
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

pub fn cdef_dir(root: &Path) -> PathBuf {
    root.join("cdef")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn write_profile(path: &Path, profile: &Profile) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string_pretty(profile)?)
        .with_context(|| format!("Failed to write profile {}", path.display()))
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Malformed profile {}", path.display()))?;
    Ok(profile.value)
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config(root: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir(root))?;
    fs::create_dir_all(cdef_dir(root))?;

    let main_profile = profiles_dir(root).join("main.json");
    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::new(),
        };
        write_profile(&main_profile, &profile)?;
        tracing::info!("Created main profile in {}", root.display());
    }

    Ok(())
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(root: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profiles_dir(root).join(format!("{name}.json"));

    let config = if profile_file.exists() {
        read_profile(&profile_file)?
    } else {
        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main_file = profiles_dir(root).join("main.json");
        if main_file.exists() {
            read_profile(&main_file)?
        } else {
            Config::new()
        }
    };

    Ok(config)
}

/// Loads a profile and fills in what lives next to it in the reo folder.
///
/// An unreadable profile falls back to defaults; the custom definitions
/// folder and legacy markers are applied either way.
pub fn load_or_default(root: &Path, name: &str) -> Config {
    let mut config = load_user_profile(root, name).unwrap_or_else(|e| {
        tracing::error!("Failed to load profile '{}': {:#}", name, e);
        Config::new()
    });

    apply_legacy_markers(root, &mut config);
    if config.custom_definitions_dir.is_none() {
        config.custom_definitions_dir = Some(cdef_dir(root).to_string_lossy().into_owned());
    }

    config
}

/// Older releases kept settings as empty marker files next to `cdef`
fn apply_legacy_markers(root: &Path, config: &mut Config) {
    let dark = root.join("dark").exists();
    let light = root.join("light").exists();
    match (dark, light) {
        (true, false) => config.ui.theme = Theme::Dark,
        (false, true) => config.ui.theme = Theme::Light,
        (true, true) => tracing::warn!("Both 'dark' and 'light' markers exist, ignoring them"),
        (false, false) => {}
    }

    if root.join("wnver31").exists() && config.dictionary.wordnet_version.is_none() {
        tracing::info!("Found 'wnver31' marker, pinning WordNet 3.1");
        config.dictionary.wordnet_version = Some("3.1".to_string());
    }

    if root.join("livesearch").exists() {
        tracing::info!("Ignoring 'livesearch' marker, console lines are searched as entered");
    }
}
