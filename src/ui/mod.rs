mod track;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::marquee::NUM_SETS;
use crate::theme::Theme;
use track::MarqueeView;

fn split(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(3), // Track box
            Constraint::Length(1), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn track_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

/// Inner area of the track box for a given screen size
pub fn track_area(screen: Rect) -> Rect {
    track_block().inner(split(screen)[1])
}

pub fn draw(f: &mut Frame, app: &App) {
    let [info, track, footer] = split(f.area());

    draw_info_line(f, app, info);
    draw_track(f, app, track);
    draw_footer(f, app, footer);

    if app.popup == Popup::Help {
        draw_help_popup(f, &app.theme);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let marquee = app.marquee.marquee();

    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(theme.warning)))
    } else if !marquee.is_laid_out() {
        Line::from(Span::styled("Waiting for layout…", Style::default().fg(theme.text_dim)))
    } else {
        let hovered_logo = marquee
            .hovered_instance()
            .and_then(|i| marquee.instances().get(i))
            .and_then(|instance| app.logos.get(instance.item));

        let state = if app.paused {
            "paused".to_string()
        } else if let Some(logo) = hovered_logo {
            format!("hover {}", logo.label)
        } else if marquee.is_hovered() && marquee.options().pause_on_hover {
            "hover".to_string()
        } else {
            "running".to_string()
        };

        let fps = app
            .last_frame
            .filter(|frame| frame.dt > 0.0)
            .map(|frame| format!("{:.0} fps ", 1.0 / frame.dt))
            .unwrap_or_default();

        Line::from(vec![
            Span::styled(format!("{} ", marquee.options().direction), Style::default().fg(theme.accent)),
            Span::styled("│ ", Style::default().fg(theme.text_dim)),
            Span::styled(
                format!("{:>5.1}/{:.0} px/s ", marquee.velocity(), marquee.options().speed),
                Style::default().fg(theme.text),
            ),
            Span::styled("│ ", Style::default().fg(theme.text_dim)),
            Span::styled(
                format!("{} logos × {} ", app.logos.len(), NUM_SETS),
                Style::default().fg(theme.text_dim),
            ),
            Span::styled("│ ", Style::default().fg(theme.text_dim)),
            Span::styled(format!("{}wraps {} ", fps, app.wraps), Style::default().fg(theme.text_dim)),
            Span::styled("│ ", Style::default().fg(theme.text_dim)),
            Span::styled(state, Style::default().fg(theme.text_dim)),
        ])
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_track(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let hovered = app.marquee.marquee().is_hovered();
    let border = if hovered { theme.highlight } else { theme.border };

    let block = track_block()
        .title(Span::styled(" Partners ", Style::default().fg(theme.text_dim)))
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    f.render_widget(
        MarqueeView {
            marquee: app.marquee.marquee(),
            logos: &app.logos,
            theme,
        },
        inner,
    );
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = vec![
        ("Space", if app.paused { "Resume" } else { "Pause" }),
        ("+/-", "Speed"),
        ("d", "Direction"),
        ("p", "Hover pause"),
        ("s", "Smoothing"),
        ("w", "Save"),
        ("h", "Help"),
        ("q", "Quit"),
    ];

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 90 { 6 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(app.theme.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(app.theme.text_dim)),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center), area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().fg(theme.header).add_modifier(Modifier::BOLD)))
    };
    let entry = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(theme.accent)),
            Span::raw(text),
        ])
    };

    let help_text = vec![
        heading("═══ Motion ═══"),
        entry("Space", "Pause / resume scrolling"),
        entry("+ / -", "Faster / slower"),
        entry("d", "Cycle direction: left → right → up → down"),
        entry("s", "Toggle fps-independent velocity easing"),
        Line::from(""),
        heading("═══ Mouse ═══"),
        entry("hover", "Ease to a stop (when hover pause is on)"),
        entry("p", "Toggle hover pause"),
        entry("click", "Open the logo's link"),
        Line::from(""),
        heading("═══ Config ═══"),
        entry("w", "Write current settings to the config file"),
        entry("r", "Reload the config file"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("h", Style::default().fg(theme.accent)),
            Span::styled("/", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" to close", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" logoloop Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
