use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position as CellPosition, Rect};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::logo::{self, Logo, CELL_HEIGHT, CELL_WIDTH};
use crate::marquee::host::TerminalHost;
use crate::marquee::runner::MarqueeLoop;
use crate::marquee::{FrameReport, Position, MAX_SPEED};
use crate::theme::Theme;
use crate::ui;

/// How long a status message stays on the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Multiplier applied by the +/- keys
const SPEED_STEP: f64 = 1.1;

/// Time constant used when fps-independent smoothing is toggled on
const DEFAULT_TIME_CONSTANT: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub popup: Popup,

    pub config: AppConfig,
    pub config_path: PathBuf,
    pub theme: Theme,

    // Marquee state
    pub logos: Vec<Logo>,
    pub marquee: MarqueeLoop<TerminalHost>,
    pub track_area: Rect, // Inner area of the track box, in cells
    pub paused: bool, // Space toggles; speed is kept in config
    pub last_frame: Option<FrameReport>,
    pub wraps: usize, // Instances wrapped since mount

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig, config_path: PathBuf, screen: Rect) -> Self {
        let track_area = ui::track_area(screen);
        let logos = config.logos.clone();

        let mut marquee = MarqueeLoop::new(TerminalHost::new(), config.marquee_options());
        marquee.mount(
            logo::cells_to_units(track_area.width, track_area.height),
            logo::measure_all(&logos),
        );

        Self {
            popup: Popup::None,
            theme: Theme::load(&config.theme),
            config,
            config_path,
            logos,
            marquee,
            track_area,
            paused: false,
            last_frame: None,
            wraps: 0,
            status_message: None,
            status_message_time: None,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.config.marquee.fps.max(1)))
    }

    /// Terminal resized: recompute the track and forward it to the marquee
    pub fn on_resize(&mut self, screen: Rect) {
        self.track_area = ui::track_area(screen);
        tracing::debug!("Track resized to {}x{} cells", self.track_area.width, self.track_area.height);
        if self.marquee.host().is_observing_resize() {
            self.marquee.on_resize(logo::cells_to_units(self.track_area.width, self.track_area.height));
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup == Popup::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')) {
                self.popup = Popup::None;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char(' ') => self.toggle_pause(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(SPEED_STEP),
            KeyCode::Char('-') => self.change_speed(1.0 / SPEED_STEP),
            KeyCode::Char('d') => self.cycle_direction(),
            KeyCode::Char('p') => self.toggle_pause_on_hover(),
            KeyCode::Char('s') => self.toggle_smoothing(),
            KeyCode::Char('w') => {
                self.config.save_to(&self.config_path)?;
                self.set_status(format!("Saved {}", self.config_path.display()));
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let point = self.track_point(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.marquee.update(|m| {
                    m.pointer_moved(point);
                });
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(point) = point else { return Ok(()) };
                let marquee = self.marquee.marquee();
                let Some(clicked) = marquee
                    .instance_at(point)
                    .and_then(|i| marquee.instances().get(i))
                    .and_then(|instance| self.logos.get(instance.item))
                else {
                    return Ok(());
                };

                match clicked.url.clone() {
                    Some(url) => {
                        let label = clicked.label.clone();
                        logo::open_link(&url).await?;
                        self.set_status(format!("Opening {} ({})", label, url));
                    }
                    None => {
                        let msg = format!("{} has no link", clicked.label);
                        self.set_status(msg);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Map a terminal cell to the centre of that cell in track units
    fn track_point(&self, column: u16, row: u16) -> Option<Position> {
        if !self.track_area.contains(CellPosition::new(column, row)) {
            return None;
        }
        let col = f64::from(column - self.track_area.x);
        let row = f64::from(row - self.track_area.y);
        Some(Position::new(
            col * CELL_WIDTH + CELL_WIDTH / 2.0,
            row * CELL_HEIGHT + CELL_HEIGHT / 2.0,
        ))
    }

    fn apply_speed(&mut self) {
        let speed = if self.paused { 0.0 } else { self.config.marquee.speed };
        self.marquee.update(|m| m.set_speed(speed));
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.apply_speed();
        self.set_status(if self.paused { "Paused" } else { "Resumed" });
    }

    fn change_speed(&mut self, factor: f64) {
        let speed = (self.config.marquee.speed * factor).clamp(1.0, MAX_SPEED);
        self.config.marquee.speed = speed;
        self.apply_speed();
        self.set_status(format!("Speed: {:.0}/s", speed));
    }

    fn cycle_direction(&mut self) {
        let direction = self.config.marquee.direction.next();
        self.config.marquee.direction = direction;
        self.marquee.update(|m| {
            m.set_direction(direction);
        });
        self.set_status(format!("Direction: {}", direction));
    }

    fn toggle_pause_on_hover(&mut self) {
        let enabled = !self.config.marquee.pause_on_hover;
        self.config.marquee.pause_on_hover = enabled;
        self.marquee.update(|m| m.set_pause_on_hover(enabled));
        self.set_status(if enabled { "Pause on hover: on" } else { "Pause on hover: off" });
    }

    fn toggle_smoothing(&mut self) {
        let tau = match self.config.marquee.smoothing_time_constant {
            Some(_) => None,
            None => Some(DEFAULT_TIME_CONSTANT),
        };
        self.config.marquee.smoothing_time_constant = tau;
        let smoothing = self.config.smoothing();
        self.marquee.update(|m| m.set_smoothing(smoothing));
        self.set_status(match tau {
            Some(tau) => format!("Smoothing: time constant {:.2}s", tau),
            None => "Smoothing: per frame".to_string(),
        });
    }

    /// Re-read the config file and remount the marquee with it
    fn reload(&mut self) {
        let config = AppConfig::load_from(&self.config_path);
        self.theme = Theme::load(&config.theme);
        self.logos = config.logos.clone();
        self.paused = false;

        let mut marquee = MarqueeLoop::new(TerminalHost::new(), config.marquee_options());
        marquee.mount(
            logo::cells_to_units(self.track_area.width, self.track_area.height),
            logo::measure_all(&self.logos),
        );
        // Dropping the old loop unmounts it
        self.marquee = marquee;
        self.wraps = 0;
        self.config = config;
        self.set_status("Config reloaded");
    }

    /// Called every frame interval by the event loop
    pub fn tick(&mut self, now: Duration) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        if let Some(handle) = self.marquee.host_mut().take_frame() {
            if let Some(report) = self.marquee.on_frame(handle, now) {
                tracing::trace!(
                    dt = report.dt,
                    displacement = report.displacement,
                    wrapped = report.wrapped,
                    "frame"
                );
                self.wraps = self.wraps.saturating_add(report.wrapped);
                self.last_frame = Some(report);
            }
        }
    }
}
