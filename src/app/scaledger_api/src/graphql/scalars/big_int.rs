use async_graphql::Value;
use async_graphql::dynamic::Scalar;
use schema_build::GqlScalar;

#[nutype::nutype(derive(AsRef, Clone, Debug, Into))]
pub struct BigInt(num_bigint::BigInt);

impl BigInt {
    pub fn parse_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => {
                let big_int = s.parse().map_err(|e| format!("Invalid BigInt: {e}"))?;
                Ok(BigInt::new(big_int))
            }
            Value::Number(n) => Err(format!(
                "Invalid BigInt: the value is expected to be a string (\"{n}\") instead of a \
                 number ({n})"
            )),
            v @ (Value::Null
            | Value::Boolean(_)
            | Value::Binary(_)
            | Value::Enum(_)
            | Value::List(_)
            | Value::Object(_)) => Err(format!("Invalid BigInt: unexpected value {v}")),
        }
    }
}

/// Registration of the custom scalars a column can be exposed as.
pub fn custom_scalar(scalar: GqlScalar) -> Scalar {
    let mut gql_scalar = Scalar::new(scalar.type_name());

    if let Some(description) = scalar.description() {
        gql_scalar = gql_scalar.description(description);
    }

    if scalar == GqlScalar::BigInt {
        gql_scalar = gql_scalar.validator(|value| BigInt::parse_value(value).is_ok());
    }

    gql_scalar
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
