use std::fmt::{Display, Formatter};

use crate::entities::SubjectId;

/// The relation payload entities are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRelation {
    pub schema: String,
    pub name: String,
    pub primary_key: String,
    /// SQL type of the primary key, e.g. `bigint`
    pub primary_key_sql_type: String,
    /// Columns read as text, so that values a JSON number cannot hold exactly
    /// keep every digit
    pub text_columns: Vec<String>,
}

impl Display for TargetRelation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    PrimaryKeyEquals { column: String, value: SubjectId },
}
