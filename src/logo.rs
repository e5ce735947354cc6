//! Logos shown on the marquee and their terminal measurements

use anyhow::{Context, Result};
use ratatui::text::Line;
use serde::{Deserialize, Serialize};

use crate::marquee::{MarqueeItem, Size};

/// Track units per terminal column / row.
/// The marquee works in pixel-like units so speeds and gaps read the same as
/// on the web page; a cell is roughly 8x16 px.
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

/// Border plus one column of padding on each side
const FRAME_COLS: u16 = 4;
const FRAME_ROWS: u16 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    pub key: String,
    pub label: String,
    /// Optional ASCII art drawn instead of the label
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub art: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Logo {
    pub fn new(key: &str, label: &str, url: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            art: Vec::new(),
            url: url.map(str::to_string),
        }
    }

    /// Content lines, without the frame
    pub fn lines(&self) -> Vec<&str> {
        if self.art.is_empty() {
            vec![self.label.as_str()]
        } else {
            self.art.iter().map(String::as_str).collect()
        }
    }

    /// Footprint in cells including the frame; (0, 0) while there is nothing to draw
    pub fn cells(&self) -> (u16, u16) {
        let lines = self.lines();
        let width = lines
            .iter()
            .map(|l| Line::from(*l).width())
            .max()
            .unwrap_or(0);

        if width == 0 {
            return (0, 0);
        }

        let width = u16::try_from(width).unwrap_or(u16::MAX - FRAME_COLS);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX - FRAME_ROWS);
        (width + FRAME_COLS, height + FRAME_ROWS)
    }

    pub fn measure(&self) -> Size {
        let (cols, rows) = self.cells();
        cells_to_units(cols, rows)
    }

    pub fn marquee_item(&self) -> MarqueeItem {
        MarqueeItem::new(self.key.clone(), self.measure())
    }
}

pub fn cells_to_units(cols: u16, rows: u16) -> Size {
    Size::new(f64::from(cols) * CELL_WIDTH, f64::from(rows) * CELL_HEIGHT)
}

pub fn measure_all(logos: &[Logo]) -> Vec<MarqueeItem> {
    logos.iter().map(Logo::marquee_item).collect()
}

/// Partner logos from the landing page
pub fn default_logos() -> Vec<Logo> {
    vec![
        Logo::new("vega", "VEGA", Some("https://www.vega.lk/")),
        Logo::new("cg", "CODEGEN", Some("https://codegen.co.uk/")),
        Logo::new("aigrow", "AI GROW", Some("https://aigrow.lk/")),
        Logo::new("rise", "THE RISE AI", None),
    ]
}

fn opener() -> &'static str {
    if cfg!(target_os = "macos") { "open" } else { "xdg-open" }
}

/// Open a logo's link with the desktop opener without blocking the UI
pub async fn open_link(url: &str) -> Result<()> {
    tokio::process::Command::new(opener())
        .arg(url)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to launch {} for {}", opener(), url))?;
    tracing::info!("Opened {}", url);
    Ok(())
}
