// SPDX-License-Identifier: MPL-2.0
//! Frame coalescing.
//!
//! State mutations call [`RenderScheduler::schedule`]; the host asks for an
//! animation frame only when it returns `true`. On the frame the host calls
//! [`RenderScheduler::flush`], which renders once with whatever the latest
//! state is. A burst of updates inside one frame therefore costs one paint.

/// Coalesces render requests into at most one paint per frame.
#[derive(Debug, Clone, Default)]
pub struct RenderScheduler {
    pending: bool,
    frames: u64,
}

impl RenderScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a render as needed.
    ///
    /// Returns `true` when the caller must request a frame from the host,
    /// `false` when one is already pending.
    pub fn schedule(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Runs `render` if a frame is pending and clears the pending flag.
    ///
    /// Returns `None` (without calling `render`) when nothing was scheduled.
    pub fn flush<R>(&mut self, render: impl FnOnce() -> R) -> Option<R> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.frames += 1;
        Some(render())
    }

    /// Drops a pending frame.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_updates_renders_once_with_latest_value() {
        let mut scheduler = RenderScheduler::new();
        let mut value = 0;
        let mut requests = 0;

        for i in 1..=10 {
            value = i;
            if scheduler.schedule() {
                requests += 1;
            }
        }

        let rendered = scheduler.flush(|| value);
        assert_eq!(requests, 1);
        assert_eq!(rendered, Some(10));
        assert_eq!(scheduler.frames_rendered(), 1);
    }

    #[test]
    fn flush_without_schedule_is_noop() {
        let mut scheduler = RenderScheduler::new();
        assert_eq!(scheduler.flush(|| ()), None);
        assert_eq!(scheduler.frames_rendered(), 0);
    }

    #[test]
    fn cancel_drops_pending_frame() {
        let mut scheduler = RenderScheduler::new();
        scheduler.schedule();
        scheduler.cancel();

        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.flush(|| ()), None);
    }

    #[test]
    fn schedule_after_flush_requests_new_frame() {
        let mut scheduler = RenderScheduler::new();
        assert!(scheduler.schedule());
        scheduler.flush(|| ());
        assert!(scheduler.schedule());
    }
}
