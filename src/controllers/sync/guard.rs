use crate::core::timing::timer_queue::{TimerHandle, TimerQueue};

/// Anti-oscillation guard for one channel of a link.
///
/// Armed while a propagation is in flight and for one frame afterwards, so a
/// notification fired as a side effect of the link's own write is dropped.
#[derive(Debug, Default)]
pub struct SyncGuard {
    armed: bool,
    release: Option<TimerHandle>,
    trailing: bool,
}

impl SyncGuard {
    /// Arms the guard; returns `false` if it already was.
    pub fn try_arm(&mut self) -> bool {
        if self.armed {
            return false;
        }

        self.armed = true;
        true
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Stores the timer that will release the guard, replacing any earlier one.
    pub fn set_release(&mut self, handle: TimerHandle, timers: &TimerQueue) {
        if let Some(previous) = self.release.replace(handle) {
            timers.cancel(previous);
        }
    }

    /// Asks for one more propagation once the guard opens again.
    pub fn request_trailing(&mut self) {
        self.trailing = true;
    }

    /// Opens the guard; returns whether a trailing propagation was requested.
    pub fn release(&mut self) -> bool {
        self.armed = false;
        self.release = None;

        std::mem::take(&mut self.trailing)
    }

    pub fn clear(&mut self, timers: &TimerQueue) {
        if let Some(handle) = self.release.take() {
            timers.cancel(handle);
        }
        self.armed = false;
        self.trailing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::SyncGuard;
    use crate::core::timing::timer_queue::TimerQueue;
    use std::time::Duration;

    #[test]
    fn arming_twice_is_refused() {
        let mut guard = SyncGuard::default();

        assert!(guard.try_arm());
        assert!(!guard.try_arm());
        assert!(guard.is_armed());

        assert!(!guard.release());
        assert!(guard.try_arm());
    }

    #[test]
    fn trailing_request_is_reported_once() {
        let mut guard = SyncGuard::default();
        guard.try_arm();
        guard.request_trailing();

        assert!(guard.release());
        guard.try_arm();
        assert!(!guard.release());
    }

    #[test]
    fn clear_cancels_release_timer() {
        let timers = TimerQueue::new();
        let mut guard = SyncGuard::default();
        guard.try_arm();
        guard.set_release(timers.schedule_once(Duration::from_millis(16), || {}), &timers);

        guard.clear(&timers);

        assert!(!guard.is_armed());
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn replacing_release_cancels_previous_timer() {
        let timers = TimerQueue::new();
        let mut guard = SyncGuard::default();

        guard.set_release(timers.schedule_once(Duration::from_millis(16), || {}), &timers);
        guard.set_release(timers.schedule_once(Duration::from_millis(16), || {}), &timers);

        assert_eq!(timers.pending_count(), 1);
    }
}
