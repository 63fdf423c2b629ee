use crate::core::data::ids::SurfaceId;
use crate::ports::surface::Surface;
use std::sync::Arc;

/// A host rendering engine owning one or more surfaces.
pub trait RenderingEngine: Send + Sync {
    fn surface(&self, surface_id: &SurfaceId) -> Option<Arc<dyn Surface>>;
}
