use crate::controllers::sync::context::SyncContext;
use crate::controllers::sync::errors::ConfigurationError;
use crate::controllers::sync::link::SyncLink;
use crate::controllers::sync::options::SyncOptions;
use crate::core::data::ids::SurfaceAddress;

/// Builds links against one shared [`SyncContext`].
#[derive(Debug, Clone, Default)]
pub struct LinkFactory {
    context: SyncContext,
}

impl LinkFactory {
    #[must_use]
    pub fn new(context: SyncContext) -> Self {
        Self { context }
    }

    #[must_use]
    pub fn context(&self) -> &SyncContext {
        &self.context
    }

    pub fn create(
        &self,
        source_engine_id: &str,
        source_surface_id: &str,
        target_engine_id: &str,
        target_surface_id: &str,
        options: SyncOptions,
    ) -> Result<SyncLink, ConfigurationError> {
        SyncLink::new(
            source_engine_id,
            source_surface_id,
            target_engine_id,
            target_surface_id,
            options,
            &self.context,
        )
    }

    /// Two independent links `A -> B` and `B -> A` with the same options.
    ///
    /// Neither is enabled. Each keeps its own guards; the pair settles
    /// because a link never writes a value the target already holds.
    pub fn create_bidirectional(
        &self,
        engine_a: &str,
        surface_a: &str,
        engine_b: &str,
        surface_b: &str,
        options: SyncOptions,
    ) -> Result<(SyncLink, SyncLink), ConfigurationError> {
        let a = SurfaceAddress::new(engine_a, surface_a)?;
        let b = SurfaceAddress::new(engine_b, surface_b)?;

        let forward = SyncLink::build(a.clone(), b.clone(), options, &self.context, true)?;
        let backward = SyncLink::build(b, a, options, &self.context, true)?;

        Ok((forward, backward))
    }
}
