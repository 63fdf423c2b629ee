use crate::core::data::ids::SurfaceId;
use crate::ports::engine::RenderingEngine;
use crate::ports::surface::Surface;
use crate::surfaces::memory::surface::MemorySurface;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct MemoryEngine {
    surfaces: Mutex<HashMap<SurfaceId, Arc<MemorySurface>>>,
}

impl MemoryEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the surface under `surface_id`.
    pub fn add_surface(&self, surface_id: SurfaceId, surface: MemorySurface) -> Arc<MemorySurface> {
        let surface = Arc::new(surface);
        self.lock().insert(surface_id, Arc::clone(&surface));

        surface
    }

    pub fn remove_surface(&self, surface_id: &SurfaceId) -> Option<Arc<MemorySurface>> {
        self.lock().remove(surface_id)
    }

    #[must_use]
    pub fn get(&self, surface_id: &SurfaceId) -> Option<Arc<MemorySurface>> {
        self.lock().get(surface_id).map(Arc::clone)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SurfaceId, Arc<MemorySurface>>> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RenderingEngine for MemoryEngine {
    fn surface(&self, surface_id: &SurfaceId) -> Option<Arc<dyn Surface>> {
        self.lock()
            .get(surface_id)
            .map(|surface| Arc::clone(surface) as Arc<dyn Surface>)
    }
}
