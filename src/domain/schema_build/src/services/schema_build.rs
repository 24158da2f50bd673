use std::sync::Arc;

use crate::services::{ConflictingOverrideError, TypeMappingRegistry};

/// State threaded through the build hooks before the GraphQL schema is
/// assembled.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuild {
    pub type_mapping: TypeMappingRegistry,
}

#[derive(thiserror::Error, Debug)]
pub enum SchemaBuildError {
    #[error(transparent)]
    ConflictingOverride(#[from] ConflictingOverrideError),
}

/// A hook invoked once, synchronously, during the build phase.
pub trait SchemaBuildHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn build(&self, build: SchemaBuild) -> Result<SchemaBuild, SchemaBuildError>;
}

/// Applies hooks in registration order.
#[derive(Default)]
pub struct SchemaBuildPipeline {
    hooks: Vec<Arc<dyn SchemaBuildHook>>,
}

impl SchemaBuildPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(mut self, hook: Arc<dyn SchemaBuildHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn hook_names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn run(&self, initial: SchemaBuild) -> Result<SchemaBuild, SchemaBuildError> {
        self.hooks.iter().try_fold(initial, |build, hook| {
            tracing::debug!(hook = hook.name(), "Applying schema build hook");
            hook.build(build)
        })
    }
}
