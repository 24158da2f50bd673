use serde::Serialize;
use serde_json::{Map, Value};

/// Read-only projection of one row, keyed by column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRow(Map<String, Value>);

impl EntityRow {
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(columns) => Some(Self(columns)),
            _ => None,
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn columns(&self) -> &Map<String, Value> {
        &self.0
    }
}
