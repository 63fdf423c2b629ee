use thiserror::Error;

/// Failure reported by a host surface for a single read, write, or render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("surface is not ready: {0}")]
    NotReady(String),
    #[error("surface rejected the state: {0}")]
    Rejected(String),
    #[error("render failed: {0}")]
    Render(String),
}
