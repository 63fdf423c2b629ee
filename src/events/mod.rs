pub mod input;
pub mod notification;

pub use input::{InputEvent, Key, PointerButton};
pub use notification::SurfaceNotification;
