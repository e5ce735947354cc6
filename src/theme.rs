//! Theme colors for the marquee UI
//! Built-in palette, optionally overridden from the `[theme]` config section

use ratatui::style::Color;

use crate::config::{ConfigError, ThemeConfig};

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color, // Key hints, hovered logo
    pub text: Color, // Logo labels
    pub text_dim: Color, // Info line, footer descriptions
    pub border: Color, // Logo frames and track border
    pub highlight: Color, // Track border while hovered
    pub header: Color, // Help popup headings
    pub warning: Color, // Status messages
}

impl Default for Theme {
    fn default() -> Self {
        // Dark landing-page palette: white logos on black, amber accent
        Self {
            accent: Color::Rgb(255, 193, 7),
            text: Color::Rgb(235, 235, 235),
            text_dim: Color::Rgb(138, 138, 141),
            border: Color::Rgb(89, 89, 89),
            highlight: Color::Rgb(205, 214, 244),
            header: Color::Rgb(243, 139, 168),
            warning: Color::Rgb(250, 179, 135),
        }
    }
}

impl Theme {
    /// Apply config overrides on top of the defaults
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ConfigError> {
        let mut theme = Self::default();

        for (field, value) in config.entries() {
            let Some(value) = value else { continue };
            let color = parse_hex_color(value)
                .ok_or_else(|| ConfigError::InvalidColor { field, value: value.to_string() })?;

            match field {
                "accent" => theme.accent = color,
                "text" => theme.text = color,
                "text_dim" => theme.text_dim = color,
                "border" => theme.border = color,
                "highlight" => theme.highlight = color,
                _ => {}
            }
        }

        Ok(theme)
    }

    /// Like [`Theme::from_config`], falling back to defaults on bad colours
    pub fn load(config: &ThemeConfig) -> Self {
        Self::from_config(config).unwrap_or_else(|e| {
            tracing::warn!("Using default theme: {}", e);
            Self::default()
        })
    }
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');

    if !s.is_ascii() {
        return None;
    }

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
        let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
        let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}
