mod surface_registry;

pub use surface_registry::SurfaceRegistry;
