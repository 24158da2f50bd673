use serde::{Deserialize, Serialize};

/// GraphQL scalar a database column is exposed as.
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum GqlScalar {
    Int,
    Float,
    String,
    Boolean,
    /// Arbitrary precision integer, serialized as a string
    BigInt,
    /// Arbitrary precision decimal, serialized as a string
    BigFloat,
    Date,
    Datetime,
    Uuid,
    Json,
}

impl GqlScalar {
    pub const CUSTOM: [GqlScalar; 6] = [
        GqlScalar::BigInt,
        GqlScalar::BigFloat,
        GqlScalar::Date,
        GqlScalar::Datetime,
        GqlScalar::Uuid,
        GqlScalar::Json,
    ];

    pub fn type_name(self) -> &'static str {
        match self {
            GqlScalar::Int => "Int",
            GqlScalar::Float => "Float",
            GqlScalar::String => "String",
            GqlScalar::Boolean => "Boolean",
            GqlScalar::BigInt => "BigInt",
            GqlScalar::BigFloat => "BigFloat",
            GqlScalar::Date => "Date",
            GqlScalar::Datetime => "Datetime",
            GqlScalar::Uuid => "UUID",
            GqlScalar::Json => "JSON",
        }
    }

    /// Scalars whose values travel as strings, so that no digit is lost.
    pub fn is_string_encoded(self) -> bool {
        matches!(self, GqlScalar::BigInt | GqlScalar::BigFloat)
    }

    pub fn description(self) -> Option<&'static str> {
        match self {
            GqlScalar::BigInt => Some(
                "A signed eight-byte integer. The upper big integer values are greater than the \
                 max value for a JavaScript number. Therefore all big integers will be output as \
                 strings and not numbers.",
            ),
            GqlScalar::BigFloat => Some(
                "A floating point number that requires more precision than IEEE 754 binary 64",
            ),
            GqlScalar::Date => Some("The day, does not include a time."),
            GqlScalar::Datetime => Some(
                "A point in time as described by the [ISO 8601] standard. May or may not include \
                 a timezone.",
            ),
            GqlScalar::Uuid => Some("A universally unique identifier as defined by RFC 4122."),
            GqlScalar::Json => Some("A JavaScript object encoded in the JSON format."),
            GqlScalar::Int | GqlScalar::Float | GqlScalar::String | GqlScalar::Boolean => None,
        }
    }
}
