pub mod group;
pub mod interaction;
pub mod sync;
