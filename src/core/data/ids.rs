use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("{kind} identifier must not be empty")]
    Empty { kind: &'static str },
}

fn checked(kind: &'static str, value: String) -> Result<String, IdError> {
    if value.trim().is_empty() {
        return Err(IdError::Empty { kind });
    }

    Ok(value)
}

/// Opaque identifier of a rendering engine in the [`SurfaceRegistry`](crate::registry::SurfaceRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineId(String);

impl EngineId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        checked("engine", value.into()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a surface within its engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        checked("surface", value.into()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified location of a surface: which engine, which pane.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceAddress {
    pub engine_id: EngineId,
    pub surface_id: SurfaceId,
}

impl SurfaceAddress {
    pub fn new(engine_id: &str, surface_id: &str) -> Result<Self, IdError> {
        Ok(Self {
            engine_id: EngineId::new(engine_id)?,
            surface_id: SurfaceId::new(surface_id)?,
        })
    }
}

impl fmt::Display for SurfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.engine_id, self.surface_id)
    }
}
