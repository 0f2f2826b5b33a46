//! Configuration loading and parsing.
//!
//! Parses `selectbar.toml` (or an override path provided by the binary):
//! the highlight color and the overlay placement tunables. Every key is
//! optional; a missing file or a parse error yields defaults. Unknown fields
//! are ignored (TOML deserialization tolerance).
//!
//! Out-of-range values are clamped by `Config::sanitize`, which logs each
//! adjustment under the `config` target. The raw file string is retained for
//! diagnostics.

use anyhow::Result;
use core_text::{Color, DEFAULT_HIGHLIGHT};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

/// Vertical gap added to the text size between selection and toolbar.
pub const DEFAULT_MARGIN: f32 = 20.0;
/// Width the toolbar window is shown with.
pub const DEFAULT_TOOLBAR_WIDTH: i32 = 976;
/// Size substituted when the first measurement of the toolbar comes back empty.
pub const FALLBACK_WIDTH: i32 = 976;
pub const FALLBACK_HEIGHT: i32 = 192;

/// How a computed anchor is handed to the floating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementMode {
    /// Move the window to the computed anchor.
    #[default]
    Absolute,
    /// Previous-anchor accumulation per the documented formula:
    /// `x = prev.x + (anchor.x + prev.x)`, `y = prev.y + (anchor.y - prev.y - widget_scroll_y)`.
    LegacyAccumulate,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct HighlightConfig {
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverlayConfig {
    #[serde(default = "OverlayConfig::default_margin")]
    pub margin: f32,
    #[serde(default = "OverlayConfig::default_width")]
    pub width: i32,
    #[serde(default = "OverlayConfig::default_fallback_width")]
    pub fallback_width: i32,
    #[serde(default = "OverlayConfig::default_fallback_height")]
    pub fallback_height: i32,
    #[serde(default)]
    pub placement: PlacementMode,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            margin: Self::default_margin(),
            width: Self::default_width(),
            fallback_width: Self::default_fallback_width(),
            fallback_height: Self::default_fallback_height(),
            placement: PlacementMode::default(),
        }
    }
}

impl OverlayConfig {
    const fn default_margin() -> f32 {
        DEFAULT_MARGIN
    }
    const fn default_width() -> i32 {
        DEFAULT_TOOLBAR_WIDTH
    }
    const fn default_fallback_width() -> i32 {
        FALLBACK_WIDTH
    }
    const fn default_fallback_height() -> i32 {
        FALLBACK_HEIGHT
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Config path following platform conventions: `./selectbar.toml` first, then
/// the platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("selectbar.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("selectbar").join("selectbar.toml");
    }
    PathBuf::from("selectbar.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    let mut cfg = parse(&content);
    cfg.sanitize();
    Ok(cfg)
}

/// Parse config text; malformed input falls back to defaults.
pub fn parse(content: &str) -> Config {
    match toml::from_str::<ConfigFile>(content) {
        Ok(file) => Config {
            raw: Some(content.to_string()),
            file,
        },
        Err(e) => {
            warn!(target: "config", error = %e, "config_parse_failed_using_defaults");
            Config::default()
        }
    }
}

impl Config {
    pub fn highlight_color(&self) -> Color {
        self.file.highlight.color.unwrap_or(DEFAULT_HIGHLIGHT)
    }

    pub fn overlay(&self) -> &OverlayConfig {
        &self.file.overlay
    }

    /// Clamp values that would produce degenerate placement. Returns the number of
    /// fields adjusted.
    pub fn sanitize(&mut self) -> usize {
        let ov = &mut self.file.overlay;
        let mut adjusted = 0;
        if !ov.margin.is_finite() || ov.margin < 0.0 {
            info!(target: "config", raw = ov.margin, clamped = DEFAULT_MARGIN, "overlay_margin_clamped");
            ov.margin = DEFAULT_MARGIN;
            adjusted += 1;
        }
        if ov.width <= 0 {
            info!(target: "config", raw = ov.width, clamped = DEFAULT_TOOLBAR_WIDTH, "overlay_width_clamped");
            ov.width = DEFAULT_TOOLBAR_WIDTH;
            adjusted += 1;
        }
        if ov.fallback_width <= 0 || ov.fallback_height <= 0 {
            info!(
                target: "config",
                raw_width = ov.fallback_width,
                raw_height = ov.fallback_height,
                "overlay_fallback_size_clamped"
            );
            ov.fallback_width = FALLBACK_WIDTH;
            ov.fallback_height = FALLBACK_HEIGHT;
            adjusted += 1;
        }
        adjusted
    }
}
