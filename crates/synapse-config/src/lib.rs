//! Configuration file handling for synapse.
//!
//! The configuration lives in `config.toml` inside the platform config
//! directory. Every field has a default, so a missing file or a partial one
//! is fine; a file that exists but does not parse is reported as an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, eyre};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use synapse_core::{AnimationStyle, FloatingConfig, LayeredConfig, Rgb, ShapeFieldConfig};
use tracing::{debug, info};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Lowest and highest accepted frame rates.
const FPS_RANGE: (u32, u32) = (1, 120);

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Animation shown at startup.
    pub style: AnimationStyle,
    /// Seed for entity placement; a fresh seed is taken from the clock when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Target frames per second.
    pub fps: u32,
    /// Colour translucent drawing is blended against.
    pub backdrop: Rgb,
    pub shapes: ShapeFieldConfig,
    pub layered: LayeredConfig,
    pub floating: FloatingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: AnimationStyle::default(),
            seed: None,
            fps: 30,
            backdrop: Rgb::new(15, 23, 42),
            shapes: ShapeFieldConfig::default(),
            layered: LayeredConfig::default(),
            floating: FloatingConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// platform has no config directory or the file does not exist.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;
        info!(path = %path.display(), style = ?config.style, "loaded config");
        Ok(config)
    }

    /// Save to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = config_path().ok_or_else(|| eyre!("no config directory available"))?;
        self.save_to(&path)
    }

    /// Save to an explicit path, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).wrap_err("failed to serialize config")?;
        fs::write(path, raw)
            .wrap_err_with(|| format!("failed to write config file {}", path.display()))?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Time budget for one frame at the configured rate.
    pub fn frame_interval(&self) -> Duration {
        let fps = self.fps.clamp(FPS_RANGE.0, FPS_RANGE.1);
        Duration::from_millis(1000 / u64::from(fps))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "synapse")
}

/// Path of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Directory for runtime data such as the log file.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = Config {
            style: AnimationStyle::FloatingNetwork,
            seed: Some(7),
            fps: 24,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "style = \"layered-network\"\n\n[layered]\nlayer_count = 3\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.style, AnimationStyle::LayeredNetwork);
        assert_eq!(config.layered.layer_count, 3);
        assert_eq!(
            config.layered.neurons_per_layer,
            LayeredConfig::default().neurons_per_layer
        );
        assert_eq!(config.shapes, ShapeFieldConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "backdrop = \"not a colour\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_frame_interval_clamps_rate() {
        let mut config = Config::default();
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
        config.fps = 0;
        assert_eq!(config.frame_interval(), Duration::from_millis(1000));
        config.fps = 1000;
        assert_eq!(config.frame_interval(), Duration::from_millis(8));
    }
}
