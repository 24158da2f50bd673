use crate::entities::{GqlScalar, PgTypeOid};
use crate::services::{OverrideRegistration, SchemaBuild, SchemaBuildError, SchemaBuildHook};

/// Exposes `int8` columns as `Int` instead of the string-encoded `BigInt`.
///
/// CAUTION: the narrowing is not guarded. `int8` values outside the safe
/// integer range of the clients (2^53-1 for JavaScript numbers, and the
/// 32-bit range the GraphQL specification gives `Int`) are emitted as is and
/// will be truncated or corrupted on the client side. Every `int8` column
/// exposed through the API must carry a database constraint keeping its values
/// within that range.
pub struct ForceBigIntHook;

impl SchemaBuildHook for ForceBigIntHook {
    fn name(&self) -> &'static str {
        "ForceBigIntHook"
    }

    fn build(&self, mut build: SchemaBuild) -> Result<SchemaBuild, SchemaBuildError> {
        let registration =
            build
                .type_mapping
                .register_override(PgTypeOid::INT8, GqlScalar::Int, self.name())?;

        if registration == OverrideRegistration::AlreadyRegistered {
            tracing::debug!("int8 is already mapped to Int");
        }

        Ok(build)
    }
}
