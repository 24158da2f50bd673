use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Primary key value carried by a notification, in its canonical text form.
///
/// The value is only ever sent to the database as a bound parameter.
#[derive(Debug, Hash, PartialEq, Eq, Clone, PartialOrd, Ord, Serialize)]
pub struct SubjectId(String);

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unsupported subject value: {0}")]
pub struct InvalidSubjectError(pub String);

impl SubjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Self, InvalidSubjectError> {
        match value {
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            serde_json::Value::String(s) => Ok(Self(s.clone())),
            v @ (serde_json::Value::Null
            | serde_json::Value::Bool(_)
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_)) => Err(InvalidSubjectError(v.to_string())),
        }
    }
}

impl Display for SubjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SubjectId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for SubjectId {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}
