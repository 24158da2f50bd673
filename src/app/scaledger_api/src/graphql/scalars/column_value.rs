use async_graphql::Value;
use live_events::SubjectId;
use schema_build::GqlScalar;

use crate::graphql::prelude::*;

/// Converts a column value read from the database into its GraphQL output.
///
/// `BigInt` and `BigFloat` are emitted as strings. Their columns are read as
/// text by the database, numbers are only stringified when a reader hands them
/// over as such. Columns mapped to `Int` are passed through as numbers without
/// any range check.
pub fn column_value(scalar: GqlScalar, raw: &serde_json::Value) -> GqlResult<Value> {
    match (scalar, raw) {
        (_, serde_json::Value::Null) => Ok(Value::Null),
        (scalar, serde_json::Value::Number(n)) if scalar.is_string_encoded() => {
            Ok(Value::String(n.to_string()))
        }
        (_, raw) => Ok(Value::from_json(raw.clone())?),
    }
}

/// Converts a primary key argument into the subject used for the lookup.
pub fn subject_from_argument(scalar: GqlScalar, value: &Value) -> GqlResult<SubjectId> {
    match (scalar, value) {
        (GqlScalar::BigInt, value) => {
            let big_int = BigInt::parse_value(value).map_err(GqlError::new)?;
            Ok(SubjectId::new(big_int.as_ref().to_string()))
        }
        (_, Value::Number(n)) => Ok(SubjectId::new(n.to_string())),
        (_, Value::String(s)) => Ok(SubjectId::new(s.clone())),
        (_, v) => Err(GqlError::new(format!("Unsupported identifier value: {v}"))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(GqlScalar::Int, json!(500), Value::from(500))]
    #[case(GqlScalar::Int, json!(9_007_199_254_740_993_i64), Value::from(9_007_199_254_740_993_i64))]
    #[case(GqlScalar::BigInt, json!(9_007_199_254_740_993_i64), Value::from("9007199254740993"))]
    #[case(GqlScalar::BigInt, json!("12"), Value::from("12"))]
    #[case(
        GqlScalar::BigFloat,
        json!("12345678901234567890.123456789"),
        Value::from("12345678901234567890.123456789")
    )]
    #[case(GqlScalar::BigFloat, json!("99999999999999999999"), Value::from("99999999999999999999"))]
    #[case(GqlScalar::String, json!(null), Value::Null)]
    #[case(GqlScalar::Json, json!({"a": [1, 2]}), Value::from_json(json!({"a": [1, 2]})).unwrap())]
    fn test_column_value(
        #[case] scalar: GqlScalar,
        #[case] raw: serde_json::Value,
        #[case] expected: Value,
    ) {
        assert_eq!(expected, column_value(scalar, &raw).unwrap());
    }

    #[rstest]
    #[case(GqlScalar::Int, Value::from(42), "42")]
    #[case(GqlScalar::BigInt, Value::from("9007199254740993"), "9007199254740993")]
    #[case(GqlScalar::Uuid, Value::from("0b6f4b3e-5c1d-4e63-9a55-2f0d4c7e8a10"), "0b6f4b3e-5c1d-4e63-9a55-2f0d4c7e8a10")]
    fn test_subject_from_argument(
        #[case] scalar: GqlScalar,
        #[case] value: Value,
        #[case] expected: &str,
    ) {
        assert_eq!(
            SubjectId::new(expected),
            subject_from_argument(scalar, &value).unwrap()
        );
    }

    #[test]
    fn test_big_int_argument_must_be_a_string() {
        let e = subject_from_argument(GqlScalar::BigInt, &Value::from(42)).unwrap_err();

        assert_eq!(
            "Invalid BigInt: the value is expected to be a string (\"42\") instead of a number (42)",
            e.message
        );
    }
}
