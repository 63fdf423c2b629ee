use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

enum TimerTask {
    Once(Box<dyn FnOnce() + Send>),
    Repeating {
        period: Duration,
        callback: Arc<dyn Fn() + Send + Sync>,
    },
}

enum Fire {
    Once(Box<dyn FnOnce() + Send>),
    Repeating(Arc<dyn Fn() + Send + Sync>),
}

struct TimerEntry {
    handle: TimerHandle,
    deadline: Duration,
    sequence: u64,
    task: TimerTask,
}

#[derive(Default)]
struct QueueState {
    now: Duration,
    next_handle: u64,
    next_sequence: u64,
    entries: Vec<TimerEntry>,
}

impl QueueState {
    fn allocate_handle(&mut self) -> TimerHandle {
        self.next_handle += 1;
        TimerHandle(self.next_handle)
    }

    fn insert(&mut self, handle: TimerHandle, deadline: Duration, task: TimerTask) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.entries.push(TimerEntry {
            handle,
            deadline,
            sequence,
            task,
        });
    }

    fn take_due(&mut self, horizon: Duration) -> Option<TimerEntry> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= horizon)
            .min_by_key(|(_, entry)| (entry.deadline, entry.sequence))
            .map(|(position, _)| position)?;

        Some(self.entries.swap_remove(position))
    }
}

/// Timers for a single-threaded event loop, measured on a logical clock.
///
/// The host advances the clock from its own frame loop; due callbacks run in
/// deadline order, then scheduling order. No lock is held while a callback
/// runs, so callbacks may schedule and cancel timers freely.
#[derive(Clone, Default)]
pub struct TimerQueue {
    state: Arc<Mutex<QueueState>>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    pub fn schedule_once<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.lock();
        let handle = state.allocate_handle();
        let deadline = state.now.saturating_add(delay);
        state.insert(handle, deadline, TimerTask::Once(Box::new(callback)));

        handle
    }

    pub fn schedule_repeating<F>(&self, period: Duration, callback: F) -> TimerHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        let period = period.max(Duration::from_nanos(1));

        let mut state = self.lock();
        let handle = state.allocate_handle();
        let deadline = state.now.saturating_add(period);
        state.insert(
            handle,
            deadline,
            TimerTask::Repeating {
                period,
                callback: Arc::new(callback),
            },
        );

        handle
    }

    /// Returns `false` when the timer already fired or was cancelled.
    pub fn cancel(&self, handle: TimerHandle) -> bool {
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|entry| entry.handle != handle);

        state.entries.len() != before
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.lock()
            .entries
            .iter()
            .any(|entry| entry.handle == handle)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Moves the clock forward by `elapsed`, firing every timer that falls
    /// due on the way. Returns the number of callbacks invoked.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let horizon = self.lock().now.saturating_add(elapsed);
        let mut fired = 0;

        loop {
            let task = {
                let mut state = self.lock();
                let Some(entry) = state.take_due(horizon) else {
                    state.now = horizon;
                    break;
                };

                state.now = state.now.max(entry.deadline);

                match entry.task {
                    TimerTask::Once(callback) => Fire::Once(callback),
                    TimerTask::Repeating { period, callback } => {
                        let next_deadline = entry.deadline.saturating_add(period);
                        state.insert(
                            entry.handle,
                            next_deadline,
                            TimerTask::Repeating {
                                period,
                                callback: Arc::clone(&callback),
                            },
                        );
                        Fire::Repeating(callback)
                    }
                }
            };

            match task {
                Fire::Once(callback) => callback(),
                Fire::Repeating(callback) => callback(),
            }
            fired += 1;
        }

        fired
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("TimerQueue")
            .field("now", &state.now)
            .field("pending", &state.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn once_fires_exactly_at_deadline() {
        let timers = TimerQueue::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let handle = timers.schedule_once(ms(16), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(timers.advance(ms(15)), 0);
        assert!(timers.is_pending(handle));

        assert_eq!(timers.advance(ms(1)), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!timers.is_pending(handle));
        assert_eq!(timers.now(), ms(16));

        assert_eq!(timers.advance(ms(100)), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn repeating_fires_once_per_period() {
        let timers = TimerQueue::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let handle = timers.schedule_repeating(ms(50), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(timers.advance(ms(175)), 3);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert!(timers.is_pending(handle));

        assert_eq!(timers.advance(ms(25)), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn cancel_prevents_firing() {
        let timers = TimerQueue::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let handle = timers.schedule_repeating(ms(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert_eq!(timers.advance(ms(100)), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn callbacks_run_in_deadline_then_schedule_order() {
        let timers = TimerQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay) in [("late", 30), ("first", 10), ("second", 10)] {
            let order = Arc::clone(&order);
            let _ = timers.schedule_once(ms(delay), move || {
                order.lock().unwrap().push(label);
            });
        }

        timers.advance(ms(30));

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "late"]);
    }

    #[test]
    fn callbacks_may_schedule_and_cancel_timers() {
        let timers = TimerQueue::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let inner_timers = timers.clone();
        let inner_hits = Arc::clone(&hits);
        let _ = timers.schedule_once(ms(5), move || {
            let hits = Arc::clone(&inner_hits);
            let _ = inner_timers.schedule_once(ms(5), move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        });

        assert_eq!(timers.advance(ms(10)), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn repeating_timer_can_cancel_itself() {
        let timers = TimerQueue::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let slot = Arc::new(Mutex::new(None));

        let inner_timers = timers.clone();
        let inner_hits = Arc::clone(&hits);
        let inner_slot = Arc::clone(&slot);
        let handle = timers.schedule_repeating(ms(10), move || {
            if inner_hits.fetch_add(1, Ordering::SeqCst) == 1 {
                if let Some(handle) = *inner_slot.lock().unwrap() {
                    inner_timers.cancel(handle);
                }
            }
        });
        *slot.lock().unwrap() = Some(handle);

        timers.advance(ms(100));

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(!timers.is_pending(handle));
    }
}
