//! User-tunable settings for a capture session.
//!
//! Stored as JSON under the platform config directory
//! (`~/.config/snapnote/config.json` on Linux). Every field is optional in
//! the file; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SnipError};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "SNAPNOTE_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SnipConfig {
    /// Smallest selection width committed on release
    pub min_width: u32,
    /// Smallest selection height committed on release
    pub min_height: u32,
    /// Wait after hiding the caller's window before grabbing the screen
    pub settle_delay_ms: u64,
    /// Opacity of the black dim layer (0 = none, 255 = opaque)
    pub overlay_alpha: u8,
    pub border_color: [u8; 3],
    pub border_width: u32,
    /// Length of each corner accent arm
    pub corner_size: u32,
    pub corner_thickness: u32,
    pub jpeg_quality: u8,
    pub default_file_name: String,
}

impl Default for SnipConfig {
    fn default() -> Self {
        Self {
            min_width: 10,
            min_height: 10,
            settle_delay_ms: 300,
            overlay_alpha: 128,
            border_color: [0, 120, 215],
            border_width: 2,
            corner_size: 8,
            corner_thickness: 3,
            jpeg_quality: 90,
            default_file_name: "screenshot.png".to_string(),
        }
    }
}

impl SnipConfig {
    /// Loads from `$SNAPNOTE_CONFIG` or the default location.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SnipError::Config(format!("{}: {}", path.display(), e)))?;
        let config: SnipConfig = serde_json::from_str(&text)
            .map_err(|e| SnipError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(p));
        }
        dirs::config_dir().map(|d| d.join("snapnote").join("config.json"))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    fn validate(&self) -> Result<()> {
        // A zero minimum would let a click commit an empty image.
        if self.min_width == 0 || self.min_height == 0 {
            return Err(SnipError::Config(format!(
                "minimum selection must be at least 1x1, got {}x{}",
                self.min_width, self.min_height
            )));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(SnipError::Config(format!(
                "jpeg_quality must be 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.default_file_name.trim().is_empty() {
            return Err(SnipError::Config("default_file_name is empty".to_string()));
        }
        Ok(())
    }
}
