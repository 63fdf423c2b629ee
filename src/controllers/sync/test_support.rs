use crate::controllers::sync::context::SyncContext;
use crate::controllers::sync::factory::LinkFactory;
use crate::controllers::sync::link::SyncLink;
use crate::controllers::sync::options::SyncOptions;
use crate::core::data::camera::Camera;
use crate::core::data::ids::{EngineId, SurfaceId};
use crate::core::data::vec3::Vec3;
use crate::surfaces::memory::{MemoryEngine, MemorySurface};
use std::sync::Arc;
use std::time::Duration;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A camera looking down -z whose focal point sits at `(x, 0, 0)`.
pub fn camera_at(x: f64) -> Camera {
    Camera {
        position: Vec3::new(x, 0.0, 1.0),
        focal_point: Vec3::new(x, 0.0, 0.0),
        ..Camera::default()
    }
}

/// Two registered engines, `left` holding surface `a` and `right` holding `b`.
pub struct Fixture {
    pub context: SyncContext,
    pub left: Arc<MemoryEngine>,
    pub right: Arc<MemoryEngine>,
}

impl Fixture {
    pub fn new() -> Self {
        init_logging();

        let context = SyncContext::default();
        let left = Arc::new(MemoryEngine::new());
        let right = Arc::new(MemoryEngine::new());
        context
            .registry
            .register(EngineId::new("left").unwrap(), left.clone());
        context
            .registry
            .register(EngineId::new("right").unwrap(), right.clone());

        Self {
            context,
            left,
            right,
        }
    }

    pub fn left_surface(&self, surface: MemorySurface) -> Arc<MemorySurface> {
        self.left.add_surface(SurfaceId::new("a").unwrap(), surface)
    }

    pub fn right_surface(&self, surface: MemorySurface) -> Arc<MemorySurface> {
        self.right.add_surface(SurfaceId::new("b").unwrap(), surface)
    }

    /// Link from `left/a` to `right/b`.
    pub fn link(&self, options: SyncOptions) -> SyncLink {
        SyncLink::new("left", "a", "right", "b", options, &self.context).expect("link should build")
    }

    pub fn pair(&self, options: SyncOptions) -> (SyncLink, SyncLink) {
        LinkFactory::new(self.context.clone())
            .create_bidirectional("left", "a", "right", "b", options)
            .expect("pair should build")
    }

    pub fn advance(&self, millis: u64) {
        self.context.timers.advance(Duration::from_millis(millis));
    }
}
