use anyhow::{Context, Result};
use directories::ProjectDirs;
use egui::Color32;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::schedule::TimeOfDay;

/// Unpremultiplied RGBA, stored as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, a])
    }

    /// Lowers alpha to at most `a`; never makes the color more opaque.
    pub fn with_alpha_at_most(self, a: u8) -> Self {
        self.with_alpha(self.0[3].min(a))
    }
}

impl From<Rgba> for Color32 {
    fn from(c: Rgba) -> Self {
        let [r, g, b, a] = c.0;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// The seven colors the strip is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "default_progress_fill")]
    pub progress_fill: Rgba,
    #[serde(default = "default_timeline")]
    pub timeline: Rgba,
    #[serde(default = "default_current_time")]
    pub current_time: Rgba,
    #[serde(default = "default_block")]
    pub block: Rgba,
    #[serde(default = "default_block_hover")]
    pub block_hover: Rgba,
    #[serde(default = "default_block_border")]
    pub block_border: Rgba,
    #[serde(default = "default_font")]
    pub font: Rgba,
}

fn default_progress_fill() -> Rgba {
    Rgba::new(0, 100, 0, 128)
}

fn default_timeline() -> Rgba {
    Rgba::new(0, 0, 139, 128)
}

fn default_current_time() -> Rgba {
    Rgba::new(255, 0, 0, 255)
}

fn default_block() -> Rgba {
    Rgba::new(255, 255, 255, 128)
}

fn default_block_hover() -> Rgba {
    Rgba::new(34, 34, 139, 200)
}

fn default_block_border() -> Rgba {
    Rgba::new(0, 0, 0, 255)
}

fn default_font() -> Rgba {
    Rgba::new(0, 0, 0, 255)
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            progress_fill: default_progress_fill(),
            timeline: default_timeline(),
            current_time: default_current_time(),
            block: default_block(),
            block_hover: default_block_hover(),
            block_border: default_block_border(),
            font: default_font(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_start_of_day")]
    pub start_of_day: TimeOfDay,
    #[serde(default)]
    pub colors: Palette,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

fn default_start_of_day() -> TimeOfDay {
    TimeOfDay::from_hm(6, 0).unwrap_or_default()
}

fn default_window_width() -> f32 {
    1200.0
}

fn default_window_height() -> f32 {
    160.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_of_day: default_start_of_day(),
            colors: Palette::default(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings_path = Self::settings_path()?;

        if settings_path.exists() {
            let contents = fs::read_to_string(&settings_path)
                .context("Failed to read settings file")?;
            let settings = serde_json::from_str(&contents)
                .context("Failed to parse settings file")?;
            info!("Loaded settings from {}", settings_path.display());
            Ok(settings)
        } else {
            info!("No previous settings found, using defaults");
            Ok(Settings::default())
        }
    }

    /// Like [`Settings::load`], but a broken file falls back to defaults.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("Using default settings: {:#}", e);
            Settings::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        let settings_path = Self::settings_path()?;

        // Ensure directory exists
        if let Some(parent) = settings_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&settings_path, contents)?;

        Ok(())
    }

    fn settings_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("settings.json"))
    }
}

/// Per-user directory holding `settings.json` and `schedule.json`.
pub fn config_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "daystrip", "daystrip")
        .context("Could not determine config directory")?;
    Ok(proj_dirs.config_dir().to_path_buf())
}
