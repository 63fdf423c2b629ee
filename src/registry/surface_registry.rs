use crate::core::data::ids::{EngineId, SurfaceAddress};
use crate::ports::engine::RenderingEngine;
use crate::ports::surface::Surface;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lookup from engine id to the live engine handle.
///
/// Cloning yields another handle onto the same map. Links resolve through it
/// on every sync, so re-registering an id (for example after a layout change
/// recreated the engine) takes effect without rebuilding any link.
#[derive(Clone, Default)]
pub struct SurfaceRegistry {
    engines: Arc<Mutex<HashMap<EngineId, Arc<dyn RenderingEngine>>>>,
}

impl SurfaceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last writer wins; returns the handle that was replaced, if any.
    pub fn register(
        &self,
        engine_id: EngineId,
        engine: Arc<dyn RenderingEngine>,
    ) -> Option<Arc<dyn RenderingEngine>> {
        debug!("registering engine {engine_id}");
        self.lock().insert(engine_id, engine)
    }

    pub fn unregister(&self, engine_id: &EngineId) -> Option<Arc<dyn RenderingEngine>> {
        debug!("unregistering engine {engine_id}");
        self.lock().remove(engine_id)
    }

    #[must_use]
    pub fn resolve(&self, engine_id: &EngineId) -> Option<Arc<dyn RenderingEngine>> {
        self.lock().get(engine_id).map(Arc::clone)
    }

    #[must_use]
    pub fn resolve_surface(&self, address: &SurfaceAddress) -> Option<Arc<dyn Surface>> {
        let engine = self.resolve(&address.engine_id)?;

        engine.surface(&address.surface_id)
    }

    #[must_use]
    pub fn contains(&self, engine_id: &EngineId) -> bool {
        self.lock().contains_key(engine_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EngineId, Arc<dyn RenderingEngine>>> {
        self.engines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SurfaceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<EngineId> = self.lock().keys().cloned().collect();
        ids.sort();

        f.debug_struct("SurfaceRegistry").field("engines", &ids).finish()
    }
}
