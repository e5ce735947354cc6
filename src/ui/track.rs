//! Draws marquee instances into the track, clipping logos that straddle an edge

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::logo::{Logo, CELL_HEIGHT, CELL_WIDTH};
use crate::marquee::{Bounds, Marquee};
use crate::theme::Theme;

pub struct MarqueeView<'a> {
    pub marquee: &'a Marquee,
    pub logos: &'a [Logo],
    pub theme: &'a Theme,
}

/// Cell rectangle of an instance relative to the track origin; may be negative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellBox {
    col: i32,
    row: i32,
    width: i32,
    height: i32,
}

impl CellBox {
    fn from_bounds(bounds: Bounds) -> Self {
        Self {
            col: (bounds.x / CELL_WIDTH).floor() as i32,
            row: (bounds.y / CELL_HEIGHT).floor() as i32,
            width: (bounds.width / CELL_WIDTH).round() as i32,
            height: (bounds.height / CELL_HEIGHT).round() as i32,
        }
    }

    fn is_visible(&self, area: Rect) -> bool {
        self.col + self.width > 0
            && self.row + self.height > 0
            && self.col < i32::from(area.width)
            && self.row < i32::from(area.height)
    }
}

/// Terminal columns taken by a single character
fn char_width(ch: char) -> usize {
    Span::raw(ch.to_string()).width()
}

/// Framed logo as a grid of cells; `None` marks the trailing half of a wide char
fn logo_grid(logo: &Logo, width: i32, height: i32) -> Vec<Vec<Option<char>>> {
    let (w, h) = (width.max(2) as usize, height.max(2) as usize);
    let mut grid = vec![vec![Some(' '); w]; h];

    for (x, cell) in grid[0].iter_mut().enumerate() {
        *cell = Some(if x == 0 { '╭' } else if x == w - 1 { '╮' } else { '─' });
    }
    for (x, cell) in grid[h - 1].iter_mut().enumerate() {
        *cell = Some(if x == 0 { '╰' } else if x == w - 1 { '╯' } else { '─' });
    }
    for row in grid.iter_mut().take(h - 1).skip(1) {
        row[0] = Some('│');
        row[w - 1] = Some('│');
    }

    let lines = logo.lines();
    let inner_w = w.saturating_sub(2);
    let inner_h = h.saturating_sub(2);
    let top = inner_h.saturating_sub(lines.len()) / 2;

    for (i, line) in lines.iter().enumerate().take(inner_h) {
        let row = &mut grid[1 + top + i];
        let mut col = 1 + inner_w.saturating_sub(Line::from(*line).width()) / 2;

        for ch in line.chars() {
            let width = char_width(ch);
            if width == 0 {
                continue;
            }
            if col + width > 1 + inner_w {
                break;
            }
            row[col] = Some(ch);
            for cell in &mut row[col + 1..col + width] {
                *cell = None;
            }
            col += width;
        }
    }

    grid
}

impl Widget for MarqueeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let marquee = self.marquee;

        for (index, instance) in marquee.instances().iter().enumerate() {
            let Some(logo) = self.logos.get(instance.item) else { continue };
            let Some(bounds) = marquee.instance_bounds(index) else { continue };

            let scale = marquee.instance_scale(index);
            let cells = CellBox::from_bounds(bounds.scaled(scale));
            if !cells.is_visible(area) {
                continue;
            }

            let (frame_style, text_style) = if scale != 1.0 {
                (
                    Style::default().fg(self.theme.accent),
                    Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
                )
            } else {
                (
                    Style::default().fg(self.theme.border),
                    Style::default().fg(self.theme.text).add_modifier(Modifier::BOLD),
                )
            };

            let grid = logo_grid(logo, cells.width, cells.height);
            let last_row = grid.len() - 1;

            for (dy, row) in grid.iter().enumerate() {
                let y = cells.row + dy as i32;
                if y < 0 || y >= i32::from(area.height) {
                    continue;
                }
                for (dx, &slot) in row.iter().enumerate() {
                    let x = cells.col + dx as i32;
                    if x < 0 || x >= i32::from(area.width) {
                        continue;
                    }
                    // Covered by the wide char to its left, unless that one is clipped
                    let ch = match slot {
                        Some(ch) => ch,
                        None if x == 0 => ' ',
                        None => continue,
                    };

                    let on_frame = dy == 0 || dy == last_row || dx == 0 || dx == row.len() - 1;
                    let style = if on_frame { frame_style } else { text_style };
                    if let Some(cell) = buf.cell_mut((area.x + x as u16, area.y + y as u16)) {
                        cell.set_char(ch).set_style(style);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::measure_all;
    use crate::marquee::{Direction, MarqueeOptions, Size};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_logo_grid_frames_label() {
        let logo = Logo::new("vega", "VEGA", None);
        let grid = logo_grid(&logo, 8, 3);
        let rows: Vec<String> = grid.iter().map(|r| r.iter().flatten().collect()).collect();
        assert_eq!(rows, vec!["╭──────╮", "│ VEGA │", "╰──────╯"]);
    }

    #[test]
    fn test_logo_grid_wide_chars_take_two_cells() {
        let logo = Logo::new("nihon", "日本", None);
        let grid = logo_grid(&logo, 8, 3);

        assert_eq!(grid[1].len(), 8);
        assert_eq!(
            grid[1],
            vec![Some('│'), Some(' '), Some('日'), None, Some('本'), None, Some(' '), Some('│')]
        );

        // Too wide for the frame: truncated rather than spilling over the border
        let narrow = logo_grid(&logo, 5, 3);
        assert_eq!(narrow[1], vec![Some('│'), Some('日'), None, Some(' '), Some('│')]);
    }

    #[test]
    fn test_cell_box_from_bounds() {
        let bounds = Bounds { x: -12.0, y: 104.0, width: 64.0, height: 48.0 };
        let cells = CellBox::from_bounds(bounds);
        assert_eq!(cells, CellBox { col: -2, row: 6, width: 8, height: 3 });
        assert!(cells.is_visible(Rect::new(0, 0, 10, 16)));
        assert!(!CellBox { col: -8, ..cells }.is_visible(Rect::new(0, 0, 10, 16)));
    }

    #[test]
    fn test_render_clips_at_left_edge() {
        let logos = vec![Logo::new("vega", "VEGA", None)];
        let mut marquee = Marquee::new(MarqueeOptions {
            direction: Direction::Right,
            gap: 16.0,
            ..Default::default()
        });
        marquee.set_items(measure_all(&logos));
        marquee.set_container(Size::new(20.0 * CELL_WIDTH, 3.0 * CELL_HEIGHT));

        // 0.25s at 50/s: first instance at x = -12.5, i.e. two columns off-screen
        marquee.step(0.25);

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        MarqueeView { marquee: &marquee, logos: &logos, theme: &Theme::default() }.render(area, &mut buf);

        let visible: String = row_text(&buf, 1).chars().take(6).collect();
        assert_eq!(visible, "VEGA │");
    }
}
