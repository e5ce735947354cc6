//! Display-surface capabilities the marquee depends on
//!
//! The animation never talks to a terminal (or browser) directly. A host
//! hands out frame callbacks and resize notifications; the event loop that
//! owns the host decides when a scheduled frame actually fires.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeSubscription(pub(crate) u64);

pub trait FrameHost {
    /// Request a callback on the next display frame
    fn schedule_frame(&mut self) -> FrameHandle;

    /// Drop a frame request; cancelling a fired or unknown handle is a no-op
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Start delivering container size changes
    fn observe_resize(&mut self) -> ResizeSubscription;

    fn disconnect(&mut self, subscription: ResizeSubscription);
}

/// Host for the crossterm event loop.
///
/// Holds at most one pending frame, which the loop drains once per frame
/// interval, and gates whether terminal resize events reach the marquee.
#[derive(Debug, Default)]
pub struct TerminalHost {
    next_id: u64,
    pending_frame: Option<FrameHandle>,
    resize: Option<ResizeSubscription>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Take the frame due this interval, if one was requested
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    pub fn is_observing_resize(&self) -> bool {
        self.resize.is_some()
    }
}

impl FrameHost for TerminalHost {
    fn schedule_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.pending_frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }

    fn observe_resize(&mut self) -> ResizeSubscription {
        let subscription = ResizeSubscription(self.next_id());
        self.resize = Some(subscription);
        subscription
    }

    fn disconnect(&mut self, subscription: ResizeSubscription) {
        if self.resize == Some(subscription) {
            self.resize = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_host_single_pending_frame() {
        let mut host = TerminalHost::new();
        let first = host.schedule_frame();
        let second = host.schedule_frame();
        assert_ne!(first, second);

        // A stale handle can't cancel the newer request
        host.cancel_frame(first);
        assert_eq!(host.take_frame(), Some(second));
        assert_eq!(host.take_frame(), None);
    }

    #[test]
    fn test_terminal_host_resize_subscription() {
        let mut host = TerminalHost::new();
        assert!(!host.is_observing_resize());

        let sub = host.observe_resize();
        assert!(host.is_observing_resize());

        host.disconnect(sub);
        assert!(!host.is_observing_resize());
    }
}
