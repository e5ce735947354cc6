use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logo::{default_logos, Logo};
use crate::marquee::{
    Direction, MarqueeOptions, Smoothing, DEFAULT_GAP, DEFAULT_SCALE_ON_HOVER, DEFAULT_SPEED,
    MAX_SPEED,
};
use crate::theme::parse_hex_color;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("speed must be between 0 and {max} (got {0})", max = MAX_SPEED)]
    InvalidSpeed(f64),
    #[error("scale_on_hover must be greater than zero (got {0})")]
    InvalidScale(f64),
    #[error("gap must be a finite, non-negative number (got {0})")]
    InvalidGap(f64),
    #[error("fps must be between 1 and 240 (got {0})")]
    InvalidFps(u32),
    #[error("smoothing_time_constant must be positive (got {0})")]
    InvalidTimeConstant(f64),
    #[error("logo #{0} has an empty key")]
    EmptyLogoKey(usize),
    #[error("duplicate logo key '{0}'")]
    DuplicateLogoKey(String),
    #[error("invalid colour '{value}' for theme.{field}")]
    InvalidColor { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Scroll speed in track units (≈ px) per second
    #[serde(default = "default_speed")]
    pub speed: f64,

    #[serde(default)]
    pub direction: Direction,

    /// Ease to a stop while the pointer is over the track
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,

    #[serde(default = "default_scale_on_hover")]
    pub scale_on_hover: f64,

    #[serde(default = "default_gap")]
    pub gap: f64,

    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Seconds; when set, velocity easing no longer depends on fps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothing_time_constant: Option<f64>,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            direction: Direction::default(),
            pause_on_hover: true,
            scale_on_hover: default_scale_on_hover(),
            gap: default_gap(),
            fps: default_fps(),
            smoothing_time_constant: None,
        }
    }
}

/// Hex colours (`#RRGGBB` or `#RGB`) overriding the built-in palette
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

impl ThemeConfig {
    pub fn entries(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("accent", self.accent.as_deref()),
            ("text", self.text.as_deref()),
            ("text_dim", self.text_dim.as_deref()),
            ("border", self.border.as_deref()),
            ("highlight", self.highlight.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub marquee: MarqueeConfig,

    #[serde(default = "default_logos")]
    pub logos: Vec<Logo>,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            marquee: MarqueeConfig::default(),
            logos: default_logos(),
            theme: ThemeConfig::default(),
        }
    }
}

fn default_speed() -> f64 { DEFAULT_SPEED }
fn default_scale_on_hover() -> f64 { DEFAULT_SCALE_ON_HOVER }
fn default_gap() -> f64 { DEFAULT_GAP }
fn default_fps() -> u32 { 60 }
fn default_true() -> bool { true }

impl AppConfig {
    /// Default config file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("logoloop");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path`, writing defaults if the file doesn't exist yet.
    /// A file that fails to parse or validate is left alone and defaults are used.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Ignoring {}: {:#}", path.display(), e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            return AppConfig::default();
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!("Could not write default config: {:#}", e);
        }
        config
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Could not write {}", path.display()))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.marquee;

        if !(0.0..=MAX_SPEED).contains(&m.speed) {
            return Err(ConfigError::InvalidSpeed(m.speed));
        }
        if !m.scale_on_hover.is_finite() || m.scale_on_hover <= 0.0 {
            return Err(ConfigError::InvalidScale(m.scale_on_hover));
        }
        if !m.gap.is_finite() || m.gap < 0.0 {
            return Err(ConfigError::InvalidGap(m.gap));
        }
        if !(1..=240).contains(&m.fps) {
            return Err(ConfigError::InvalidFps(m.fps));
        }
        if let Some(tau) = m.smoothing_time_constant {
            if !tau.is_finite() || tau <= 0.0 {
                return Err(ConfigError::InvalidTimeConstant(tau));
            }
        }

        let mut seen = HashSet::new();
        for (i, logo) in self.logos.iter().enumerate() {
            if logo.key.trim().is_empty() {
                return Err(ConfigError::EmptyLogoKey(i));
            }
            if !seen.insert(logo.key.as_str()) {
                return Err(ConfigError::DuplicateLogoKey(logo.key.clone()));
            }
        }

        for (field, value) in self.theme.entries() {
            if let Some(value) = value {
                if parse_hex_color(value).is_none() {
                    return Err(ConfigError::InvalidColor { field, value: value.to_string() });
                }
            }
        }

        Ok(())
    }

    pub fn smoothing(&self) -> Smoothing {
        match self.marquee.smoothing_time_constant {
            Some(tau) => Smoothing::TimeConstant(tau),
            None => Smoothing::default(),
        }
    }

    pub fn marquee_options(&self) -> MarqueeOptions {
        MarqueeOptions {
            speed: self.marquee.speed,
            direction: self.marquee.direction,
            pause_on_hover: self.marquee.pause_on_hover,
            scale_on_hover: self.marquee.scale_on_hover,
            gap: self.marquee.gap,
            smoothing: self.smoothing(),
        }
    }
}
