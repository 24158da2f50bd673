use async_trait::async_trait;

use crate::entities::{EntityRow, RowFilter, TargetRelation};

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum RowReadError {
    #[error("Database access failed: {0}")]
    Backend(#[source] BoxedError),

    #[error("Malformed row: {0}")]
    MalformedRow(String),
}

impl RowReadError {
    pub fn backend(e: impl Into<BoxedError>) -> Self {
        Self::Backend(e.into())
    }
}

/// Filtered read against exactly one relation. Filter values are bound as
/// query parameters by implementations.
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait]
pub trait ScopedRowReader: Send + Sync {
    async fn select_rows(
        &self,
        relation: &TargetRelation,
        filter: &RowFilter,
    ) -> Result<Vec<EntityRow>, RowReadError>;
}
