//! Cross-surface state synchronization for multi-pane viewers.
//!
//! A [`SyncLink`] mirrors camera, slice and intensity state from one rendering
//! surface to another; [`LinkFactory`] builds bidirectional pairs, and
//! [`GroupSynchronizer`] broadcasts a coarse zoom/pan state across a group.

pub mod controllers;
pub mod core;
pub mod events;
pub mod input;
pub mod ports;
pub mod registry;
pub mod surfaces;

pub use crate::controllers::group::{GroupListener, GroupSynchronizer, SyncGroups};
pub use crate::controllers::sync::{
    ConfigurationError, LinkFactory, SyncChannel, SyncContext, SyncFailure, SyncLink, SyncOptions,
    SyncOptionsPatch,
};
pub use crate::core::correspondence::{CorrespondenceMap, CorrespondenceStrategy, IdentityTruncated};
pub use crate::core::data::{
    Camera, EngineId, IntensityRange, LogicalState, LogicalStatePatch, SurfaceAddress, SurfaceId, Vec3,
};
pub use crate::core::timing::{SyncTimings, TimerQueue};
pub use crate::events::{InputEvent, Key, PointerButton, SurfaceNotification};
#[cfg(feature = "winit")]
pub use crate::input::WinitInputAdapter;
pub use crate::ports::{RenderingEngine, Surface, SurfaceError, SurfaceListener};
pub use crate::registry::SurfaceRegistry;
