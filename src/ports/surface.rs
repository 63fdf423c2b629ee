use crate::core::data::camera::Camera;
use crate::core::data::intensity_range::IntensityRange;
use crate::ports::errors::SurfaceError;
use crate::ports::listener::SurfaceListener;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// A rendering pane as seen by the synchronization engine.
///
/// Every surface has a camera. Slice addressing and intensity display are
/// optional capabilities exposed through the `as_*` queries; a surface that
/// lacks one simply keeps the default `None`.
///
/// Listeners may be invoked synchronously from inside `set_*` calls.
pub trait Surface: Send + Sync {
    fn camera(&self) -> Result<Camera, SurfaceError>;

    fn set_camera(&self, camera: &Camera) -> Result<(), SurfaceError>;

    fn render(&self) -> Result<(), SurfaceError>;

    fn subscribe(&self, listener: Arc<dyn SurfaceListener>) -> SubscriptionId;

    /// Returns `false` if `subscription` was not registered.
    fn unsubscribe(&self, subscription: SubscriptionId) -> bool;

    fn as_stack(&self) -> Option<&dyn StackSurface> {
        None
    }

    fn as_intensity(&self) -> Option<&dyn IntensitySurface> {
        None
    }

    fn as_scrollable(&self) -> Option<&dyn ScrollSurface> {
        None
    }
}

/// Discrete addressing into an ordered stack of frames.
pub trait StackSurface: Send + Sync {
    fn slice_index(&self) -> Result<usize, SurfaceError>;

    fn set_slice_index(&self, index: usize) -> Result<(), SurfaceError>;

    fn slice_count(&self) -> Result<usize, SurfaceError>;
}

pub trait IntensitySurface: Send + Sync {
    fn intensity_range(&self) -> Result<IntensityRange, SurfaceError>;

    fn set_intensity_range(&self, range: &IntensityRange) -> Result<(), SurfaceError>;
}

/// Continuous (world-space) slice navigation for surfaces without a stack.
pub trait ScrollSurface: Send + Sync {
    fn scroll_by(&self, delta: i64) -> Result<(), SurfaceError>;
}
