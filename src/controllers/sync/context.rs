use crate::core::timing::timer_queue::TimerQueue;
use crate::core::timing::timings::SyncTimings;
use crate::registry::SurfaceRegistry;

/// Shared collaborators handed to every link at construction.
///
/// Built once at application start; cloning shares the same registry and
/// timer queue.
#[derive(Debug, Clone, Default)]
pub struct SyncContext {
    pub registry: SurfaceRegistry,
    pub timers: TimerQueue,
    pub timings: SyncTimings,
}

impl SyncContext {
    #[must_use]
    pub fn new(registry: SurfaceRegistry, timers: TimerQueue, timings: SyncTimings) -> Self {
        Self {
            registry,
            timers,
            timings,
        }
    }
}
