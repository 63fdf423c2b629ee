pub mod camera;
pub mod ids;
pub mod intensity_range;
pub mod logical_state;
pub mod vec3;

pub use camera::Camera;
pub use ids::{EngineId, IdError, SurfaceAddress, SurfaceId};
pub use intensity_range::IntensityRange;
pub use logical_state::{LogicalState, LogicalStatePatch};
pub use vec3::Vec3;
