//! Adapters turning a host toolkit's raw input into [`InputEvent`](crate::events::input::InputEvent)s.

#[cfg(feature = "winit")]
pub mod winit_adapter;

#[cfg(feature = "winit")]
pub use winit_adapter::WinitInputAdapter;
