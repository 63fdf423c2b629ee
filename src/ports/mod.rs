//! Port definitions for the synchronization engine.
//!
//! Traits the host rendering layer implements so links can read, write and
//! render surfaces without knowing the renderer behind them.

pub mod engine;
pub mod errors;
pub mod listener;
pub mod surface;

pub use engine::RenderingEngine;
pub use errors::SurfaceError;
pub use listener::SurfaceListener;
pub use surface::{IntensitySurface, ScrollSurface, StackSurface, SubscriptionId, Surface};
