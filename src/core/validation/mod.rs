//! Pure checks applied to state read from a surface before it may be written
//! to another one. Rejection means "skip this propagation", never an error.

pub mod camera;
pub mod intensity;
pub mod slice;

pub use camera::validate_camera;
pub use intensity::{MAX_INTENSITY_WINDOW, validate_intensity, validate_intensity_within};
pub use slice::{clamp_slice_index, validate_slice_index};
