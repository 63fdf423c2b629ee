//! Rate limiting for continuous and wheel input.

pub mod heartbeat;
pub mod session;
pub mod wheel_debounce;

pub use heartbeat::InteractionHeartbeat;
pub use session::SessionKind;
pub use wheel_debounce::WheelDebouncer;
