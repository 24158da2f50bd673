use serde::Serialize;

use crate::entities::PgTypeOid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub type_oid: PgTypeOid,
    /// Type as rendered by `format_type()`, e.g. `bigint` or `character varying(255)`
    pub sql_type: String,
    pub not_null: bool,
}

/// Catalog metadata of the single relation exposed through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationDescriptor {
    pub schema: String,
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub primary_key: String,
}

impl RelationDescriptor {
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_key_column(&self) -> Option<&ColumnDescriptor> {
        self.column(&self.primary_key)
    }
}
