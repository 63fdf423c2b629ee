//! In-memory implementation of the surface ports.
//!
//! Useful for headless hosts and as the fixture behind the link tests.

mod engine;
mod surface;

pub use engine::MemoryEngine;
pub use surface::{MemorySurface, SLICE_SPACING, WriteCounts};
