pub mod timer_queue;
pub mod timings;

pub use timer_queue::{TimerHandle, TimerQueue};
pub use timings::SyncTimings;
