use crate::controllers::interaction::session::SessionKind;
use crate::core::timing::timer_queue::{TimerHandle, TimerQueue};
use crate::core::timing::timings::SyncTimings;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub type TickCallback = Arc<dyn Fn(SessionKind) + Send + Sync>;

/// Turns a continuous interaction into a bounded-rate tick.
///
/// A session is opened by `start`, but its repeating timer is only armed by
/// the next `tick_if_active`. Links call it on every raw input event that
/// does not end a session, before opening a new one, so a press followed by
/// nothing costs nothing. Sessions of different kinds tick independently.
pub struct InteractionHeartbeat {
    timers: TimerQueue,
    camera_period: Duration,
    intensity_period: Duration,
    sessions: BTreeMap<SessionKind, Option<TimerHandle>>,
    on_tick: TickCallback,
}

impl InteractionHeartbeat {
    pub fn new(timers: TimerQueue, timings: &SyncTimings, on_tick: TickCallback) -> Self {
        Self {
            timers,
            camera_period: timings.camera_heartbeat,
            intensity_period: timings.intensity_heartbeat,
            sessions: BTreeMap::new(),
            on_tick,
        }
    }

    /// Opens a session; starting an already active kind is a no-op.
    pub fn start(&mut self, kind: SessionKind) {
        self.sessions.entry(kind).or_insert(None);
    }

    /// Arms the timer of every active session that has none pending.
    pub fn tick_if_active(&mut self) {
        for (&kind, timer) in &mut self.sessions {
            if timer.is_some_and(|handle| self.timers.is_pending(handle)) {
                continue;
            }

            let on_tick = Arc::clone(&self.on_tick);
            let period = match kind {
                SessionKind::Camera => self.camera_period,
                SessionKind::Intensity => self.intensity_period,
            };
            *timer = Some(self.timers.schedule_repeating(period, move || on_tick(kind)));
        }
    }

    /// Closes the session and cancels its timer; returns whether it was active.
    pub fn end(&mut self, kind: SessionKind) -> bool {
        match self.sessions.remove(&kind) {
            Some(timer) => {
                if let Some(handle) = timer {
                    self.timers.cancel(handle);
                }
                true
            }
            None => false,
        }
    }

    /// Closes every session, returning the kinds that were active.
    pub fn end_all(&mut self) -> Vec<SessionKind> {
        let kinds: Vec<SessionKind> = self.sessions.keys().copied().collect();
        for &kind in &kinds {
            self.end(kind);
        }

        kinds
    }

    #[must_use]
    pub fn is_active(&self, kind: SessionKind) -> bool {
        self.sessions.contains_key(&kind)
    }

    #[must_use]
    pub fn has_pending_timer(&self, kind: SessionKind) -> bool {
        self.sessions
            .get(&kind)
            .copied()
            .flatten()
            .is_some_and(|handle| self.timers.is_pending(handle))
    }
}

impl fmt::Debug for InteractionHeartbeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionHeartbeat")
            .field("camera_period", &self.camera_period)
            .field("intensity_period", &self.intensity_period)
            .field("sessions", &self.sessions)
            .finish()
    }
}

impl Drop for InteractionHeartbeat {
    fn drop(&mut self) {
        self.end_all();
    }
}
