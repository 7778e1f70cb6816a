//! Where the wheel config comes from.
//!
//! Lookup order: an explicit `--config` path, then `wheel.json` in the
//! per-user config directory, then the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use fortuna_core::WheelConfig;

pub const CONFIG_FILE: &str = "wheel.json";

/// `<config dir>/fortuna/wheel.json`, when the platform has a home directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("net", "RoyalServers", "fortuna")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn load_config(explicit: Option<&Path>) -> Result<WheelConfig> {
    if let Some(path) = explicit {
        return WheelConfig::load(path)
            .with_context(|| format!("loading wheel config from {}", path.display()));
    }
    match default_config_path() {
        Some(path) if path.exists() => Ok(load_or_default(&path)),
        _ => {
            tracing::debug!("no wheel config found; using defaults");
            Ok(WheelConfig::default())
        }
    }
}

/// A broken discovered file should not keep the wheel from showing up.
pub fn load_or_default(path: &Path) -> WheelConfig {
    match WheelConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "ignoring wheel config; using defaults"
            );
            WheelConfig::default()
        }
    }
}
