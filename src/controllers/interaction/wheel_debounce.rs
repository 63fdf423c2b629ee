use crate::core::timing::timer_queue::{TimerHandle, TimerQueue};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub type DeltaCallback = Arc<dyn Fn(i64) + Send + Sync>;

/// Trailing-edge debounce for wheel-driven slice navigation.
///
/// Each event restarts the window; when the window closes one unit step is
/// emitted in the direction of the most recent event, whatever came before.
pub struct WheelDebouncer {
    timers: TimerQueue,
    window: Duration,
    pending: Option<TimerHandle>,
    on_delta: DeltaCallback,
}

impl WheelDebouncer {
    pub fn new(timers: TimerQueue, window: Duration, on_delta: DeltaCallback) -> Self {
        Self {
            timers,
            window,
            pending: None,
            on_delta,
        }
    }

    /// Records a wheel event; a zero or non-finite delta is ignored.
    pub fn push(&mut self, delta_y: f64) {
        let direction = match wheel_direction(delta_y) {
            Some(direction) => direction,
            None => return,
        };

        self.cancel();

        let on_delta = Arc::clone(&self.on_delta);
        self.pending = Some(
            self.timers
                .schedule_once(self.window, move || on_delta(direction)),
        );
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .is_some_and(|handle| self.timers.is_pending(handle))
    }
}

fn wheel_direction(delta_y: f64) -> Option<i64> {
    if !delta_y.is_finite() || delta_y == 0.0 {
        return None;
    }

    Some(if delta_y > 0.0 { 1 } else { -1 })
}

impl fmt::Debug for WheelDebouncer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WheelDebouncer")
            .field("window", &self.window)
            .field("pending", &self.pending)
            .finish()
    }
}

impl Drop for WheelDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
