use crate::controllers::sync::channel::SyncChannel;
use crate::core::data::ids::{IdError, SurfaceAddress};
use crate::ports::errors::SurfaceError;
use thiserror::Error;

/// The only failure a link reports to its caller: bad construction input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
    #[error("source and target are the same surface ({0})")]
    SelfLink(SurfaceAddress),
    #[error("sync timings must have non-zero periods and a positive intensity window")]
    InvalidTimings,
}

/// Recoverable failures absorbed (and logged) inside a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncFailure {
    #[error("surface {address} could not be resolved")]
    Resolution { address: SurfaceAddress },
    #[error("{channel} state read from {address} was rejected")]
    ValidationRejected {
        channel: SyncChannel,
        address: SurfaceAddress,
    },
    #[error("render of {address} failed")]
    Render {
        address: SurfaceAddress,
        source: SurfaceError,
    },
    #[error("{channel} access on {address} failed")]
    Surface {
        channel: SyncChannel,
        address: SurfaceAddress,
        source: SurfaceError,
    },
    #[error("{address} does not support {channel} synchronization")]
    Unsupported {
        channel: SyncChannel,
        address: SurfaceAddress,
    },
}
