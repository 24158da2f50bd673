use async_trait::async_trait;
use live_events::{EntityRow, RowFilter, RowReadError, ScopedRowReader, TargetRelation};
use sqlx::PgPool;

use crate::render_scoped_select;

pub struct PgScopedRowReader {
    pool: PgPool,
}

impl PgScopedRowReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScopedRowReader for PgScopedRowReader {
    #[tracing::instrument(level = "debug", skip_all, fields(%relation))]
    async fn select_rows(
        &self,
        relation: &TargetRelation,
        filter: &RowFilter,
    ) -> Result<Vec<EntityRow>, RowReadError> {
        let query = render_scoped_select(relation, filter);

        let mut statement = sqlx::query_scalar::<_, serde_json::Value>(&query.sql);
        for param in &query.params {
            statement = statement.bind(param);
        }

        // A connection is borrowed from the pool for this statement only
        let raw_rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(RowReadError::backend)?;

        raw_rows
            .into_iter()
            .map(|raw_row| {
                EntityRow::from_json(raw_row).ok_or_else(|| {
                    RowReadError::MalformedRow(format!("'{relation}' row is not a JSON object"))
                })
            })
            .collect()
    }
}
