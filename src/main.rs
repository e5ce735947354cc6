mod app;
mod config;
mod logo;
mod marquee;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use marquee::host::TerminalHost;
use marquee::runner::MarqueeLoop;
use marquee::{Direction, MarqueeSnapshot};

#[derive(Parser, Debug)]
#[command(name = "logoloop")]
#[command(version)]
#[command(about = "An infinitely scrolling logo marquee for the terminal")]
struct Args {
    /// Config file (default: ~/.config/logoloop/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scroll speed in px per second (1 column = 8 px, 1 row = 16 px)
    #[arg(long)]
    speed: Option<f64>,

    /// Scroll direction: left, right, up or down
    #[arg(short, long)]
    direction: Option<Direction>,

    /// Keep scrolling while the mouse is over the track
    #[arg(long)]
    no_pause_on_hover: bool,

    /// Scale factor for the hovered logo
    #[arg(long)]
    scale_on_hover: Option<f64>,

    /// Animation frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Run N frames headless and print instance positions as JSON
    #[arg(long, value_name = "FRAMES")]
    snapshot: Option<u32>,

    /// Track width in columns for --snapshot
    #[arg(long, default_value_t = 120)]
    width: u16,

    /// Track height in rows for --snapshot
    #[arg(long, default_value_t = 8)]
    height: u16,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    /// CLI flags override the config file
    fn apply(&self, config: &mut AppConfig) {
        if let Some(speed) = self.speed {
            config.marquee.speed = speed;
        }
        if let Some(direction) = self.direction {
            config.marquee.direction = direction;
        }
        if self.no_pause_on_hover {
            config.marquee.pause_on_hover = false;
        }
        if let Some(scale) = self.scale_on_hover {
            config.marquee.scale_on_hover = scale;
        }
        if let Some(fps) = self.fps {
            config.marquee.fps = fps;
        }
    }

    fn is_headless(&self) -> bool {
        self.snapshot.is_some() || self.print_config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.is_headless());

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => AppConfig::default_path()?,
    };
    let mut config = AppConfig::load_from(&config_path);
    args.apply(&mut config);
    config.validate().context("Invalid options")?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if let Some(frames) = args.snapshot {
        return print_snapshot(&config, frames, args.width, args.height);
    }

    run_tui(config, config_path).await
}

/// The TUI owns stdout, so interactive runs log to a file in the cache dir
fn init_logging(headless: bool) {
    let log_file = if headless { None } else { open_log_file() };

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init(),
        None => tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init(),
    }
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = dirs::cache_dir()?.join("logoloop");
    std::fs::create_dir_all(&dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("logoloop.log"))
        .ok()
}

/// Headless run: the first frame only records its timestamp, so N frames
/// cover N - 1 frame intervals.
fn run_headless(config: &AppConfig, frames: u32, width: u16, height: u16) -> MarqueeSnapshot {
    let mut looper = MarqueeLoop::new(TerminalHost::new(), config.marquee_options());
    looper.mount(logo::cells_to_units(width, height), logo::measure_all(&config.logos));

    let step = Duration::from_secs_f64(1.0 / f64::from(config.marquee.fps));
    let mut now = Duration::ZERO;
    for _ in 0..frames {
        let Some(handle) = looper.host_mut().take_frame() else { break };
        looper.on_frame(handle, now);
        now += step;
    }

    looper.marquee().snapshot()
}

fn print_snapshot(config: &AppConfig, frames: u32, width: u16, height: u16) -> Result<()> {
    let snapshot = run_headless(config, frames, width, height);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

async fn run_tui(config: AppConfig, config_path: PathBuf) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(config, config_path, Rect::new(0, 0, size.width, size.height));
    tracing::info!("Starting logoloop ({}x{})", size.width, size.height);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let epoch = Instant::now();
    let frame_interval = app.frame_interval();
    let mut next_frame = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Wait for input no longer than the rest of this frame
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => {
                        if let Err(e) = app.handle_key(key).await {
                            tracing::warn!("Key handling failed: {:#}", e);
                            app.status_message = Some(format!("Error: {}", e));
                        }
                    }
                },
                Event::Mouse(mouse) => {
                    if let Err(e) = app.handle_mouse(mouse).await {
                        tracing::warn!("Mouse handling failed: {:#}", e);
                        app.status_message = Some(format!("Error: {}", e));
                    }
                }
                Event::Resize(width, height) => app.on_resize(Rect::new(0, 0, width, height)),
                _ => {}
            }
        }

        let now = Instant::now();
        if now >= next_frame {
            app.tick(epoch.elapsed());
            next_frame += frame_interval;
            // Don't try to catch up after a stall
            if next_frame < now {
                next_frame = now + frame_interval;
            }
        }
    }
}
