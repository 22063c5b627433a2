//! # Configuration
//!
//! Rently configuration is managed by [`confique`], loading `rently.toml`
//! from the data directory with environment variables layered on top:
//!
//! 1. **Environment variables**: `RENTLY_DEFAULT_VIEWPORT`, `RENTLY_MEDIA_DIR`.
//! 2. **Config file**: `<data dir>/rently.toml`.
//! 3. **Compiled defaults** via `#[config(default = ...)]`.
//!
//! The data directory itself resolves through the `directories` crate, with
//! `RENTLY_DATA_DIR` as an override (tests and scripted use).

use crate::error::{RentlyError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for rently, stored in `rently.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RentlyConfig {
    /// Viewport width (px) assumed when a client does not report one.
    /// Drives the responsive items-per-page tiers.
    #[config(env = "RENTLY_DEFAULT_VIEWPORT", default = 1280)]
    pub default_viewport: i32,

    /// Directory where uploaded listing images are stored.
    /// Defaults to `media/` inside the data directory when unset.
    #[config(env = "RENTLY_MEDIA_DIR")]
    pub media_dir: Option<String>,
}

impl Default for RentlyConfig {
    fn default() -> Self {
        Self {
            default_viewport: 1280,
            media_dir: None,
        }
    }
}

impl RentlyConfig {
    /// Load configuration for a data directory. A missing file yields the
    /// env/default layers only.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(dir.join("rently.toml"))
            .load()
            .map_err(|e| RentlyError::Api(format!("Failed to load config: {e}")))
    }

    /// Where uploaded images land, given the resolved data directory.
    pub fn media_dir(&self, data_dir: &Path) -> PathBuf {
        match &self.media_dir {
            Some(dir) => PathBuf::from(dir),
            None => data_dir.join("media"),
        }
    }
}

/// The default data directory (collections, config, session, media).
/// `RENTLY_DATA_DIR` overrides the OS-appropriate location.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("RENTLY_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let dirs = ProjectDirs::from("com", "rently", "rently")
        .ok_or_else(|| RentlyError::Store("Could not determine data directory".to_string()))?;
    Ok(dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_a_file() {
        let dir = TempDir::new().unwrap();
        let config = RentlyConfig::load(dir.path()).unwrap();
        assert_eq!(config, RentlyConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("rently.toml"),
            "default_viewport = 720\nmedia_dir = \"/srv/rently/media\"\n",
        )
        .unwrap();

        let config = RentlyConfig::load(dir.path()).unwrap();
        assert_eq!(config.default_viewport, 720);
        assert_eq!(config.media_dir.as_deref(), Some("/srv/rently/media"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = RentlyConfig {
            default_viewport: 640,
            media_dir: Some("media".into()),
        };
        let rendered = toml::to_string(&config).unwrap();
        let parsed: RentlyConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn media_dir_defaults_under_the_data_dir() {
        let config = RentlyConfig::default();
        let media = config.media_dir(Path::new("/data/rently"));
        assert_eq!(media, PathBuf::from("/data/rently/media"));

        let config = RentlyConfig {
            media_dir: Some("/elsewhere".into()),
            ..Default::default()
        };
        assert_eq!(config.media_dir(Path::new("/data/rently")), PathBuf::from("/elsewhere"));
    }
}
