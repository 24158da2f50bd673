use schema_build::{ColumnDescriptor, PgTypeOid, RelationDescriptor};
use sqlx::PgPool;

use crate::quote_ident;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Relation '{schema}.{name}' does not exist")]
    RelationNotFound { schema: String, name: String },

    #[error("Relation '{schema}.{name}' has no primary key")]
    NoPrimaryKey { schema: String, name: String },

    #[error("Relation '{schema}.{name}' has a composite primary key ({columns:?})")]
    CompositePrimaryKey {
        schema: String,
        name: String,
        columns: Vec<String>,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Reads relation metadata from `pg_catalog`.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(level = "info", skip(self))]
    pub async fn load_relation(
        &self,
        schema: &str,
        name: &str,
    ) -> Result<RelationDescriptor, CatalogError> {
        let qualified_name = format!("{}.{}", quote_ident(schema), quote_ident(name));

        let columns = sqlx::query_as::<_, (String, i64, String, bool)>(indoc::indoc!(
            r#"
            SELECT a.attname::text,
                   a.atttypid::int8,
                   format_type(a.atttypid, a.atttypmod),
                   a.attnotnull
            FROM pg_catalog.pg_attribute a
            WHERE a.attrelid = to_regclass($1)
              AND a.attnum > 0
              AND NOT a.attisdropped
            ORDER BY a.attnum
            "#
        ))
        .bind(&qualified_name)
        .fetch_all(&self.pool)
        .await?;

        if columns.is_empty() {
            return Err(CatalogError::RelationNotFound {
                schema: schema.to_string(),
                name: name.to_string(),
            });
        }

        let mut primary_key = sqlx::query_scalar::<_, String>(indoc::indoc!(
            r#"
            SELECT a.attname::text
            FROM pg_catalog.pg_index i
            JOIN pg_catalog.pg_attribute a
              ON a.attrelid = i.indrelid AND a.attnum = ANY (i.indkey)
            WHERE i.indrelid = to_regclass($1)
              AND i.indisprimary
            ORDER BY a.attnum
            "#
        ))
        .bind(&qualified_name)
        .fetch_all(&self.pool)
        .await?;

        let primary_key = match primary_key.len() {
            0 => {
                return Err(CatalogError::NoPrimaryKey {
                    schema: schema.to_string(),
                    name: name.to_string(),
                });
            }
            1 => primary_key.remove(0),
            _ => {
                return Err(CatalogError::CompositePrimaryKey {
                    schema: schema.to_string(),
                    name: name.to_string(),
                    columns: primary_key,
                });
            }
        };

        let columns = columns
            .into_iter()
            .map(|(name, type_oid, sql_type, not_null)| ColumnDescriptor {
                name,
                type_oid: PgTypeOid(u32::try_from(type_oid).unwrap_or_default()),
                sql_type,
                not_null,
            })
            .collect::<Vec<_>>();

        tracing::info!(columns = columns.len(), %primary_key, "Relation loaded");

        Ok(RelationDescriptor {
            schema: schema.to_string(),
            name: name.to_string(),
            columns,
            primary_key,
        })
    }
}
