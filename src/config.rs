use crate::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_MARGIN, DEFAULT_CANVAS_WIDTH, DEFAULT_DOT_RADIUS,
};
use crate::error::{MoodmapError, Result};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

/// Input/output paths
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    pub sentiments_csv: PathBuf,
    pub regions_json: PathBuf,
    pub tweets_file: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Rendering surface settings (pixels)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_margin")]
    pub margin: u32,
    #[serde(default = "default_dot_radius")]
    pub dot_radius: u32,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("figs")
}
fn default_width() -> u32 {
    DEFAULT_CANVAS_WIDTH
}
fn default_height() -> u32 {
    DEFAULT_CANVAS_HEIGHT
}
fn default_margin() -> u32 {
    DEFAULT_CANVAS_MARGIN
}
fn default_dot_radius() -> u32 {
    DEFAULT_DOT_RADIUS
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            dot_radius: default_dot_radius(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                sentiments_csv: PathBuf::from("data/sentiments.csv"),
                regions_json: PathBuf::from("data/regions.json"),
                tweets_file: PathBuf::from("data/tweets.txt"),
                output_dir: default_output_dir(),
            },
            canvas: CanvasConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MoodmapError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            MoodmapError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let canvas = &self.canvas;
        if canvas.width == 0 || canvas.height == 0 {
            return Err(MoodmapError::Config(format!(
                "canvas dimensions must be positive, got {}x{}",
                canvas.width, canvas.height
            )));
        }

        // Margins must leave a drawable interior.
        if 2 * canvas.margin >= canvas.width.min(canvas.height) {
            return Err(MoodmapError::Config(format!(
                "margin {} leaves no drawable area on a {}x{} canvas",
                canvas.margin, canvas.width, canvas.height
            )));
        }

        if canvas.dot_radius == 0 {
            return Err(MoodmapError::Config(
                "dot_radius must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
