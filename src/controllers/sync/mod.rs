//! Pairwise synchronization links between rendering surfaces.

pub mod channel;
pub mod context;
pub mod errors;
pub mod factory;
pub mod guard;
pub mod link;
pub mod options;

#[cfg(test)]
pub(crate) mod test_support;

pub use channel::SyncChannel;
pub use context::SyncContext;
pub use errors::{ConfigurationError, SyncFailure};
pub use factory::LinkFactory;
pub use link::SyncLink;
pub use options::{SyncOptions, SyncOptionsPatch};
