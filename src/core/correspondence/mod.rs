pub mod map;
pub mod strategy;

pub use map::{CorrespondenceError, CorrespondenceMap};
pub use strategy::{CorrespondenceStrategy, IdentityTruncated};
