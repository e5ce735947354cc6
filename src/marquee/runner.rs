//! Mount/unmount lifecycle binding a [`Marquee`] to a [`FrameHost`]

use std::time::Duration;

use super::host::{FrameHandle, FrameHost, ResizeSubscription};
use super::{FrameReport, Marquee, MarqueeItem, MarqueeOptions, Size};

/// One live marquee on one host.
///
/// Velocity, last frame time and the pending frame handle all live here (or
/// in the owned [`Marquee`]), so two loops never share animation state.
pub struct MarqueeLoop<H: FrameHost> {
    host: H,
    marquee: Marquee,
    frame: Option<FrameHandle>,
    resize: Option<ResizeSubscription>,
    mounted: bool,
}

impl<H: FrameHost> MarqueeLoop<H> {
    pub fn new(host: H, options: MarqueeOptions) -> Self {
        Self {
            host,
            marquee: Marquee::new(options),
            frame: None,
            resize: None,
            mounted: false,
        }
    }

    pub fn marquee(&self) -> &Marquee {
        &self.marquee
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_animating(&self) -> bool {
        self.frame.is_some()
    }

    /// Attach to the host, measure and start animating once laid out
    pub fn mount(&mut self, container: Size, items: Vec<MarqueeItem>) {
        if self.mounted {
            self.unmount();
        }

        self.mounted = true;
        self.resize = Some(self.host.observe_resize());
        self.marquee.set_items(items);
        self.marquee.set_container(container);

        tracing::info!(
            "Marquee mounted ({} items, {} instances)",
            self.marquee.items().len(),
            self.marquee.instances().len()
        );
        self.ensure_running();
    }

    /// Resize notification from the host
    pub fn on_resize(&mut self, container: Size) {
        if !self.mounted || self.resize.is_none() {
            return;
        }
        if self.marquee.container() == container {
            return;
        }
        self.marquee.set_container(container);
        self.ensure_running();
    }

    pub fn set_items(&mut self, items: Vec<MarqueeItem>) {
        self.marquee.set_items(items);
        self.ensure_running();
    }

    /// Apply option changes; direction changes relayout inside the marquee
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Marquee),
    {
        f(&mut self.marquee);
        self.ensure_running();
    }

    /// Frame callback. Returns `None` for stale handles and after unmount.
    pub fn on_frame(&mut self, handle: FrameHandle, now: Duration) -> Option<FrameReport> {
        if !self.mounted || self.frame != Some(handle) {
            return None;
        }
        self.frame = None;

        if !self.marquee.is_laid_out() {
            return None;
        }

        let report = self.marquee.advance(now);
        self.ensure_running();
        Some(report)
    }

    /// Cancel the pending frame and stop observing resizes
    pub fn unmount(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.host.cancel_frame(handle);
        }
        if let Some(subscription) = self.resize.take() {
            self.host.disconnect(subscription);
        }
        if self.mounted {
            tracing::info!("Marquee unmounted");
        }
        self.mounted = false;
    }

    fn ensure_running(&mut self) {
        if self.mounted && self.frame.is_none() && self.marquee.is_laid_out() {
            self.frame = Some(self.host.schedule_frame());
        }
    }
}

impl<H: FrameHost> Drop for MarqueeLoop<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marquee::{Direction, NUM_SETS};
    use std::collections::HashSet;

    /// Host driven entirely by the test: frames fire only when the test says so
    #[derive(Default)]
    struct SyntheticHost {
        next_id: u64,
        frames: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
        observers: HashSet<ResizeSubscription>,
    }

    impl SyntheticHost {
        fn fire(&mut self) -> Option<FrameHandle> {
            let handle = *self.frames.last()?;
            if self.cancelled.contains(&handle) {
                return None;
            }
            Some(handle)
        }
    }

    impl FrameHost for SyntheticHost {
        fn schedule_frame(&mut self) -> FrameHandle {
            self.next_id += 1;
            let handle = FrameHandle(self.next_id);
            self.frames.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }

        fn observe_resize(&mut self) -> ResizeSubscription {
            self.next_id += 1;
            let subscription = ResizeSubscription(self.next_id);
            self.observers.insert(subscription);
            subscription
        }

        fn disconnect(&mut self, subscription: ResizeSubscription) {
            self.observers.remove(&subscription);
        }
    }

    fn items() -> Vec<MarqueeItem> {
        vec![
            MarqueeItem::new("a", Size::new(50.0, 1.0)),
            MarqueeItem::new("b", Size::new(70.0, 1.0)),
        ]
    }

    fn tick(looper: &mut MarqueeLoop<SyntheticHost>, now_ms: u64) -> Option<FrameReport> {
        let handle = looper.host_mut().fire()?;
        looper.on_frame(handle, Duration::from_millis(now_ms))
    }

    #[test]
    fn test_zero_container_defers_until_resize() {
        let mut looper = MarqueeLoop::new(SyntheticHost::default(), MarqueeOptions::default());
        looper.mount(Size::new(0.0, 0.0), items());

        assert_eq!(looper.host().observers.len(), 1);
        assert!(!looper.is_animating());
        assert!(looper.host().frames.is_empty());

        looper.on_resize(Size::new(500.0, 100.0));
        assert!(looper.is_animating());
        assert_eq!(looper.marquee().instances().len(), 2 * NUM_SETS);
    }

    #[test]
    fn test_frames_reschedule_and_advance() {
        let mut looper = MarqueeLoop::new(SyntheticHost::default(), MarqueeOptions::default());
        looper.mount(Size::new(5000.0, 100.0), items());

        let first = tick(&mut looper, 1000).unwrap();
        assert_eq!(first.displacement, 0.0);

        let second = tick(&mut looper, 1100).unwrap();
        assert!((second.displacement - 5.0).abs() < 1e-9);
        assert!((looper.marquee().instances()[0].position.x - 5.0).abs() < 1e-9);
        assert_eq!(looper.host().frames.len(), 3);
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let mut looper = MarqueeLoop::new(SyntheticHost::default(), MarqueeOptions::default());
        looper.mount(Size::new(500.0, 100.0), items());

        let stale = looper.host().frames[0];
        tick(&mut looper, 0).unwrap();
        assert!(looper.on_frame(stale, Duration::from_millis(16)).is_none());
    }

    #[test]
    fn test_unmount_tears_everything_down() {
        let mut looper = MarqueeLoop::new(SyntheticHost::default(), MarqueeOptions::default());
        looper.mount(Size::new(500.0, 100.0), items());
        let pending = *looper.host().frames.last().unwrap();
        let before = looper.marquee().instances().to_vec();

        looper.unmount();

        assert!(looper.host().cancelled.contains(&pending));
        assert!(looper.host().observers.is_empty());
        assert!(looper.on_frame(pending, Duration::from_millis(500)).is_none());

        looper.on_resize(Size::new(900.0, 100.0));
        assert_eq!(looper.marquee().container(), Size::new(500.0, 100.0));
        assert_eq!(looper.marquee().instances(), &before[..]);
    }

    #[test]
    fn test_direction_update_keeps_loop_running() {
        let mut looper = MarqueeLoop::new(SyntheticHost::default(), MarqueeOptions::default());
        looper.mount(Size::new(500.0, 400.0), items());
        tick(&mut looper, 0);

        looper.update(|m| {
            m.set_direction(Direction::Down);
        });

        assert!(looper.is_animating());
        let report = tick(&mut looper, 100).unwrap();
        assert!(report.displacement < 0.0);
        assert_eq!(looper.marquee().instances()[0].position.x, 250.0);
    }

    #[test]
    fn test_empty_item_set_stops_animation() {
        let mut looper = MarqueeLoop::new(SyntheticHost::default(), MarqueeOptions::default());
        looper.mount(Size::new(500.0, 100.0), items());

        looper.set_items(Vec::new());
        assert!(tick(&mut looper, 0).is_none());
        assert!(!looper.is_animating());

        looper.set_items(items());
        assert!(looper.is_animating());
    }
}
