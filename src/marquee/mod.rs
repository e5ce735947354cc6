//! Infinite logo marquee
//!
//! Lays a list of measured items out along one axis in three consecutive
//! sets and advances them every frame, moving instances that scroll far
//! enough off-screen to the opposite end of the track.

pub mod host;
pub mod runner;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Number of copies of the item list kept live on the track
pub const NUM_SETS: usize = 3;

/// Off-screen buffer an instance must cross before it is wrapped
pub const WRAP_MARGIN: f64 = 200.0;

/// Spacing between consecutive instances along the scroll axis
pub const DEFAULT_GAP: f64 = 72.0;

pub const DEFAULT_SPEED: f64 = 50.0;
pub const MAX_SPEED: f64 = 2000.0;
pub const DEFAULT_SCALE_ON_HOVER: f64 = 1.1;

/// Per-frame velocity smoothing factor
pub const PER_FRAME_SMOOTHING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Right and down advance towards negative coordinates
    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    pub fn sign(self) -> f64 {
        if self.is_reverse() { -1.0 } else { 1.0 }
    }

    /// Cycle left → right → up → down → left
    pub fn next(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}' (expected left, right, up or down)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero in either dimension means "not laid out yet"
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    fn along(&self, direction: Direction) -> f64 {
        if direction.is_horizontal() { self.width } else { self.height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in track units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Grow around the centre by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        let width = self.width * factor;
        let height = self.height * factor;
        Self {
            x: self.x - (width - self.width) / 2.0,
            y: self.y - (height - self.height) / 2.0,
            width,
            height,
        }
    }
}

/// How the current velocity approaches its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// Fixed fraction per frame; damping speed depends on refresh rate
    PerFrame(f64),
    /// Exponential decay with the given time constant in seconds
    TimeConstant(f64),
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::PerFrame(PER_FRAME_SMOOTHING)
    }
}

impl Smoothing {
    /// Fraction of the remaining velocity gap closed during a frame of `dt` seconds
    pub fn factor(&self, dt: f64) -> f64 {
        match *self {
            Smoothing::PerFrame(factor) => factor,
            Smoothing::TimeConstant(tau) if tau > 0.0 => 1.0 - (-dt / tau).exp(),
            Smoothing::TimeConstant(_) => 1.0,
        }
    }
}

/// Caller-facing props of the marquee
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeOptions {
    pub speed: f64, // Units per second
    pub direction: Direction,
    pub pause_on_hover: bool,
    pub scale_on_hover: f64, // Visual multiplier for the hovered instance
    pub gap: f64,
    pub smoothing: Smoothing,
}

impl Default for MarqueeOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            direction: Direction::default(),
            pause_on_hover: true,
            scale_on_hover: DEFAULT_SCALE_ON_HOVER,
            gap: DEFAULT_GAP,
            smoothing: Smoothing::default(),
        }
    }
}

/// A renderable unit as the marquee sees it: identity plus measured footprint
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeItem {
    pub key: String,
    pub size: Size,
}

impl MarqueeItem {
    pub fn new(key: impl Into<String>, size: Size) -> Self {
        Self { key: key.into(), size }
    }
}

/// One rendered copy of an item
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub item: usize, // Index into the item list
    pub set: usize,
    pub position: Position,
}

/// Outcome of a single animation frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    pub dt: f64,
    pub displacement: f64,
    pub wrapped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstanceSnapshot {
    pub key: String,
    pub set: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarqueeSnapshot {
    pub direction: Direction,
    pub velocity: f64,
    pub container: Size,
    pub one_set_length: f64,
    pub instances: Vec<InstanceSnapshot>,
}

pub struct Marquee {
    options: MarqueeOptions,
    items: Vec<MarqueeItem>,
    container: Size,
    instances: Vec<Instance>,

    velocity: f64,
    last_frame: Option<Duration>,

    hovered: bool,
    hovered_instance: Option<usize>,
}

impl Marquee {
    pub fn new(options: MarqueeOptions) -> Self {
        Self {
            velocity: options.speed,
            options,
            items: Vec::new(),
            container: Size::default(),
            instances: Vec::new(),
            last_frame: None,
            hovered: false,
            hovered_instance: None,
        }
    }

    pub fn options(&self) -> &MarqueeOptions {
        &self.options
    }

    pub fn items(&self) -> &[MarqueeItem] {
        &self.items
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_laid_out(&self) -> bool {
        !self.instances.is_empty()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn hovered_instance(&self) -> Option<usize> {
        self.hovered_instance
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.options.speed = speed.max(0.0);
    }

    pub fn set_pause_on_hover(&mut self, enabled: bool) {
        self.options.pause_on_hover = enabled;
    }

    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.options.smoothing = smoothing;
    }

    /// Changing the axis invalidates every position, so this relays out
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.options.direction != direction {
            self.options.direction = direction;
            self.layout();
        }
        self.is_laid_out()
    }

    /// Record a new container measurement and relayout
    pub fn set_container(&mut self, container: Size) -> bool {
        self.container = container;
        self.layout()
    }

    /// Replace the item set and relayout
    pub fn set_items(&mut self, items: Vec<MarqueeItem>) -> bool {
        self.items = items;
        self.hovered_instance = None;
        self.layout()
    }

    /// Place `NUM_SETS` copies of the items along the scroll axis.
    ///
    /// Returns false and leaves the track empty while the container or any
    /// item still measures zero; a later measurement retries.
    pub fn layout(&mut self) -> bool {
        self.instances.clear();
        self.hovered_instance = None;

        if self.items.is_empty() || self.container.is_empty() {
            tracing::debug!(
                "Deferring marquee layout (items: {}, container: {}x{})",
                self.items.len(),
                self.container.width,
                self.container.height
            );
            return false;
        }

        if let Some(item) = self.items.iter().find(|item| item.size.is_empty()) {
            tracing::debug!("Deferring marquee layout: '{}' has not been measured", item.key);
            return false;
        }

        let direction = self.options.direction;
        let mut offset = 0.0;

        for set in 0..NUM_SETS {
            for (index, item) in self.items.iter().enumerate() {
                let position = if direction.is_horizontal() {
                    Position::new(offset, self.container.height / 2.0)
                } else {
                    Position::new(self.container.width / 2.0, offset)
                };
                self.instances.push(Instance { item: index, set, position });
                offset += item.size.along(direction) + self.options.gap;
            }
        }

        tracing::debug!(
            "Laid out {} instances along {} axis (one set = {})",
            self.instances.len(),
            if direction.is_horizontal() { "x" } else { "y" },
            self.one_set_length()
        );
        true
    }

    /// Sum of (size + gap) over one traversal of the items
    pub fn one_set_length(&self) -> f64 {
        let direction = self.options.direction;
        self.items
            .iter()
            .map(|item| item.size.along(direction) + self.options.gap)
            .sum()
    }

    fn target_velocity(&self) -> f64 {
        if self.hovered && self.options.pause_on_hover {
            0.0
        } else {
            self.options.speed
        }
    }

    /// Advance to the frame timestamp `now`; the first frame moves nothing
    pub fn advance(&mut self, now: Duration) -> FrameReport {
        let dt = match self.last_frame {
            Some(last) => now.saturating_sub(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.step(dt)
    }

    /// Advance by `dt` seconds: smooth the velocity, move, then wrap
    pub fn step(&mut self, dt: f64) -> FrameReport {
        let factor = self.options.smoothing.factor(dt);
        self.velocity += (self.target_velocity() - self.velocity) * factor;

        let direction = self.options.direction;
        let displacement = self.velocity * dt * direction.sign();

        if self.instances.is_empty() {
            return FrameReport { dt, displacement, wrapped: 0 };
        }

        let span = self.one_set_length() * NUM_SETS as f64;
        let extent = self.container.along(direction);
        let mut wrapped: usize = 0;

        for instance in &mut self.instances {
            let size = self.items[instance.item].size.along(direction);
            let pos = if direction.is_horizontal() {
                &mut instance.position.x
            } else {
                &mut instance.position.y
            };

            *pos += displacement;

            if span <= 0.0 {
                continue;
            }

            // Closed form so a huge displacement lands back in range in one shift
            let before = *pos;
            if direction.is_reverse() {
                let lower = -WRAP_MARGIN - size;
                if *pos < lower {
                    *pos = lower + (*pos - lower).rem_euclid(span);
                }
            } else {
                let upper = extent + WRAP_MARGIN;
                if *pos > upper {
                    *pos = upper - (upper - *pos).rem_euclid(span);
                }
            }
            if *pos != before {
                let shifts = ((*pos - before).abs() / span).round() as usize;
                wrapped = wrapped.saturating_add(shifts.max(1));
            }
        }

        if wrapped > 0 {
            tracing::trace!("Wrapped {} instance(s)", wrapped);
        }

        FrameReport { dt, displacement, wrapped }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        if !hovered {
            self.hovered_instance = None;
        }
    }

    /// Feed a pointer location (container-relative, `None` when outside).
    /// Returns true when the hover state changed.
    pub fn pointer_moved(&mut self, point: Option<Position>) -> bool {
        let before = (self.hovered, self.hovered_instance);
        match point {
            Some(point) => {
                self.hovered = true;
                self.hovered_instance = self.instance_at(point);
            }
            None => self.set_hovered(false),
        }
        before != (self.hovered, self.hovered_instance)
    }

    pub fn instance_scale(&self, index: usize) -> f64 {
        if self.hovered_instance == Some(index) {
            self.options.scale_on_hover
        } else {
            1.0
        }
    }

    /// Unscaled box of an instance: the scroll-axis coordinate is its leading
    /// edge and the cross axis is centred on the position.
    pub fn instance_bounds(&self, index: usize) -> Option<Bounds> {
        let instance = self.instances.get(index)?;
        let size = self.items.get(instance.item)?.size;
        let Position { x, y } = instance.position;

        Some(if self.options.direction.is_horizontal() {
            Bounds { x, y: y - size.height / 2.0, width: size.width, height: size.height }
        } else {
            Bounds { x: x - size.width / 2.0, y, width: size.width, height: size.height }
        })
    }

    /// Topmost instance under `point`, taking the hover scale into account
    pub fn instance_at(&self, point: Position) -> Option<usize> {
        (0..self.instances.len()).rev().find(|&i| {
            self.instance_bounds(i)
                .map(|b| b.scaled(self.instance_scale(i)).contains(point))
                .unwrap_or(false)
        })
    }

    pub fn snapshot(&self) -> MarqueeSnapshot {
        MarqueeSnapshot {
            direction: self.options.direction,
            velocity: self.velocity,
            container: self.container,
            one_set_length: self.one_set_length(),
            instances: self
                .instances
                .iter()
                .map(|instance| InstanceSnapshot {
                    key: self.items[instance.item].key.clone(),
                    set: instance.set,
                    x: instance.position.x,
                    y: instance.position.y,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_items() -> Vec<MarqueeItem> {
        vec![
            MarqueeItem::new("a", Size::new(50.0, 1.0)),
            MarqueeItem::new("b", Size::new(70.0, 1.0)),
        ]
    }

    fn laid_out(direction: Direction, container: Size) -> Marquee {
        let mut marquee = Marquee::new(MarqueeOptions { direction, ..Default::default() });
        marquee.set_items(scenario_items());
        assert!(marquee.set_container(container));
        marquee
    }

    fn axis(marquee: &Marquee, i: usize) -> f64 {
        let p = marquee.instances()[i].position;
        if marquee.options().direction.is_horizontal() { p.x } else { p.y }
    }

    #[test]
    fn test_instance_count_is_three_sets() {
        let marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
        assert_eq!(marquee.instances().len(), 2 * NUM_SETS);

        let sets: Vec<usize> = marquee.instances().iter().map(|i| i.set).collect();
        assert_eq!(sets, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_layout_scenario_offsets() {
        let marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));

        assert_eq!(axis(&marquee, 0), 0.0);
        assert_eq!(axis(&marquee, 1), 122.0);
        assert_eq!(axis(&marquee, 2), 264.0);
        assert_eq!(marquee.one_set_length(), 264.0);

        // Cross axis centred
        assert!(marquee.instances().iter().all(|i| i.position.y == 50.0));
    }

    #[test]
    fn test_vertical_layout_uses_heights() {
        let items = vec![
            MarqueeItem::new("a", Size::new(50.0, 10.0)),
            MarqueeItem::new("b", Size::new(70.0, 20.0)),
        ];
        let mut marquee = Marquee::new(MarqueeOptions { direction: Direction::Up, ..Default::default() });
        marquee.set_items(items);
        marquee.set_container(Size::new(300.0, 400.0));

        assert_eq!(marquee.instances()[1].position, Position::new(150.0, 82.0));
        assert_eq!(marquee.instances()[2].position, Position::new(150.0, 174.0));
    }

    #[test]
    fn test_zero_measurement_defers_layout() {
        let mut marquee = Marquee::new(MarqueeOptions::default());
        marquee.set_items(scenario_items());
        assert!(!marquee.set_container(Size::new(0.0, 100.0)));
        assert!(!marquee.is_laid_out());

        marquee.set_items(vec![MarqueeItem::new("a", Size::new(0.0, 0.0))]);
        assert!(!marquee.set_container(Size::new(500.0, 100.0)));

        marquee.set_items(scenario_items());
        assert!(marquee.is_laid_out());
    }

    #[test]
    fn test_displacement_matches_velocity_dt_sign() {
        for direction in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            let mut marquee = laid_out(direction, Size::new(5000.0, 5000.0));
            let before: Vec<f64> = (0..6).map(|i| axis(&marquee, i)).collect();

            let report = marquee.step(0.016);
            let expected = marquee.velocity() * 0.016 * direction.sign();
            assert!((report.displacement - expected).abs() < 1e-12);

            for (i, b) in before.iter().enumerate() {
                if report.wrapped == 0 {
                    assert!((axis(&marquee, i) - b - expected).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
        let report = marquee.advance(Duration::from_millis(1234));
        assert_eq!(report.dt, 0.0);
        assert_eq!(axis(&marquee, 0), 0.0);

        let report = marquee.advance(Duration::from_millis(1250));
        assert!((report.dt - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_forward_wrap_scenario() {
        let mut marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
        let span = marquee.one_set_length() * NUM_SETS as f64;

        // Last instance sits at 650; 1.5s at 50/s pushes it to 725, past 500 + 200
        let before = axis(&marquee, 5);
        assert_eq!(before, 650.0);
        let report = marquee.step(1.5);
        let expected = before + report.displacement - span;

        assert_eq!(report.wrapped, 1);
        assert!((axis(&marquee, 5) - expected).abs() < 1e-9);
        assert!(axis(&marquee, 5) <= 500.0 + WRAP_MARGIN);
    }

    #[test]
    fn test_forward_wrap_vertical_uses_container_height() {
        let items = vec![
            MarqueeItem::new("a", Size::new(1.0, 50.0)),
            MarqueeItem::new("b", Size::new(1.0, 70.0)),
        ];
        let mut marquee = Marquee::new(MarqueeOptions { direction: Direction::Up, ..Default::default() });
        marquee.set_items(items);
        assert!(marquee.set_container(Size::new(100.0, 500.0)));
        let span = marquee.one_set_length() * NUM_SETS as f64;

        // Same 500 + 200 scenario along y; a width-based extent would wrap far more
        assert_eq!(axis(&marquee, 5), 650.0);
        let report = marquee.step(1.5);

        assert_eq!(report.wrapped, 1);
        assert!((axis(&marquee, 5) - (725.0 - span)).abs() < 1e-9);
        assert!((axis(&marquee, 4) - 603.0).abs() < 1e-9);
    }

    #[test]
    fn test_extreme_speed_wraps_in_one_step() {
        for direction in [Direction::Left, Direction::Down] {
            let mut marquee = Marquee::new(MarqueeOptions { direction, speed: 1e300, ..Default::default() });
            marquee.set_items(scenario_items());
            assert!(marquee.set_container(Size::new(500.0, 500.0)));

            let report = marquee.step(0.016);
            assert!(report.wrapped > 0);
            for (i, instance) in marquee.instances().iter().enumerate() {
                let pos = axis(&marquee, i);
                let size = marquee.items()[instance.item].size.along(direction);
                assert!(pos.is_finite());
                assert!(pos <= 500.0 + WRAP_MARGIN);
                assert!(pos + size >= -WRAP_MARGIN);
            }
        }
    }

    #[test]
    fn test_reverse_wrap_moves_to_far_end() {
        let mut marquee = laid_out(Direction::Right, Size::new(500.0, 100.0));
        let span = marquee.one_set_length() * NUM_SETS as f64;

        // Instance 0 (width 50) must travel past -250 before wrapping
        let report = marquee.step(5.5);
        assert!(report.wrapped >= 1);
        let x = axis(&marquee, 0);
        assert!((x - (-report.displacement.abs() + span)).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_leaves_nothing_beyond_margin() {
        let mut marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
        for _ in 0..2000 {
            marquee.step(0.25);
            for i in 0..marquee.instances().len() {
                assert!(axis(&marquee, i) <= 500.0 + WRAP_MARGIN);
            }
        }

        let mut marquee = laid_out(Direction::Down, Size::new(100.0, 300.0));
        for _ in 0..500 {
            marquee.step(2.0);
            for (i, instance) in marquee.instances().iter().enumerate() {
                let size = marquee.items()[instance.item].size.height;
                assert!(axis(&marquee, i) + size >= -WRAP_MARGIN);
            }
        }
    }

    #[test]
    fn test_hover_pause_decays_velocity() {
        let mut marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
        marquee.set_hovered(true);

        let mut last = marquee.velocity().abs();
        for _ in 0..50 {
            marquee.step(1.0 / 60.0);
            let v = marquee.velocity().abs();
            assert!(v < last, "velocity should strictly decrease: {v} !< {last}");
            last = v;
        }
        assert!(last < 1.0);

        // Leaving restores the configured speed over time
        marquee.set_hovered(false);
        for _ in 0..200 {
            marquee.step(1.0 / 60.0);
        }
        assert!((marquee.velocity() - DEFAULT_SPEED).abs() < 0.01);
    }

    #[test]
    fn test_per_frame_smoothing_step_is_exact() {
        let mut marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
        marquee.set_hovered(true);

        let v0 = marquee.velocity();
        marquee.step(1.0 / 60.0);
        assert_eq!(marquee.velocity(), v0 + (0.0 - v0) * PER_FRAME_SMOOTHING);
        assert_eq!(marquee.velocity(), 45.0);
    }

    #[test]
    fn test_hover_without_pause_keeps_speed() {
        let mut marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
        marquee.set_pause_on_hover(false);
        marquee.set_hovered(true);
        marquee.step(0.016);
        assert_eq!(marquee.velocity(), DEFAULT_SPEED);
    }

    #[test]
    fn test_time_constant_smoothing_is_rate_independent() {
        let run = |fps: f64| {
            let mut marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
            marquee.set_smoothing(Smoothing::TimeConstant(0.25));
            marquee.set_hovered(true);
            let frames = fps as usize;
            for _ in 0..frames {
                marquee.step(1.0 / fps);
            }
            marquee.velocity()
        };

        assert!((run(30.0) - run(144.0)).abs() < 1e-6);
    }

    #[test]
    fn test_hover_scale_only_affects_hovered_instance() {
        let mut marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
        let before: Vec<Instance> = marquee.instances().to_vec();

        assert!(marquee.pointer_moved(Some(Position::new(130.0, 50.0))));
        assert!(marquee.is_hovered());
        assert_eq!(marquee.hovered_instance(), Some(1));
        assert_eq!(marquee.instance_scale(1), DEFAULT_SCALE_ON_HOVER);
        assert_eq!(marquee.instance_scale(0), 1.0);
        assert_eq!(marquee.instances(), &before[..]);

        assert!(marquee.pointer_moved(None));
        assert!(!marquee.is_hovered());
        assert_eq!(marquee.hovered_instance(), None);
    }

    #[test]
    fn test_direction_change_relays_out() {
        let mut marquee = laid_out(Direction::Left, Size::new(500.0, 100.0));
        marquee.step(0.5);
        assert!(marquee.set_direction(Direction::Up));
        assert_eq!(marquee.instances()[0].position, Position::new(250.0, 0.0));
        assert_eq!(marquee.one_set_length(), 2.0 + 2.0 * DEFAULT_GAP);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" down ".parse::<Direction>(), Ok(Direction::Down));
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Down.next(), Direction::Left);
    }
}
