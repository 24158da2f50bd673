use std::collections::BTreeMap;

use crate::entities::{GqlScalar, PgTypeOid};

/// Explicit mapping from PostgreSQL type identifiers to GraphQL scalars.
///
/// Defaults are seeded on construction; build hooks register overrides on top
/// of them. Lookups consult overrides first.
#[derive(Debug, Clone)]
pub struct TypeMappingRegistry {
    defaults: BTreeMap<PgTypeOid, GqlScalar>,
    overrides: BTreeMap<PgTypeOid, TypeOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOverride {
    pub scalar: GqlScalar,
    pub registered_by: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum OverrideRegistration {
    Registered,
    AlreadyRegistered,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error(
    "Conflicting mapping for type '{type_oid}': '{existing_hook}' maps it to {existing:?}, \
     '{new_hook}' tried {requested:?}"
)]
pub struct ConflictingOverrideError {
    pub type_oid: PgTypeOid,
    pub existing: GqlScalar,
    pub existing_hook: &'static str,
    pub requested: GqlScalar,
    pub new_hook: &'static str,
}

impl TypeMappingRegistry {
    pub const FALLBACK: GqlScalar = GqlScalar::String;

    pub fn with_defaults() -> Self {
        use GqlScalar as S;

        let defaults = [
            (PgTypeOid::BOOL, S::Boolean),
            (PgTypeOid::NAME, S::String),
            (PgTypeOid::INT8, S::BigInt),
            (PgTypeOid::INT2, S::Int),
            (PgTypeOid::INT4, S::Int),
            (PgTypeOid::TEXT, S::String),
            (PgTypeOid::JSON, S::Json),
            (PgTypeOid::FLOAT4, S::Float),
            (PgTypeOid::FLOAT8, S::Float),
            (PgTypeOid::BPCHAR, S::String),
            (PgTypeOid::VARCHAR, S::String),
            (PgTypeOid::DATE, S::Date),
            (PgTypeOid::TIMESTAMP, S::Datetime),
            (PgTypeOid::TIMESTAMPTZ, S::Datetime),
            (PgTypeOid::NUMERIC, S::BigFloat),
            (PgTypeOid::UUID, S::Uuid),
            (PgTypeOid::JSONB, S::Json),
        ]
        .into_iter()
        .collect();

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    pub fn resolve(&self, type_oid: PgTypeOid) -> GqlScalar {
        self.overrides
            .get(&type_oid)
            .map(|o| o.scalar)
            .or_else(|| self.defaults.get(&type_oid).copied())
            .unwrap_or(Self::FALLBACK)
    }

    pub fn override_for(&self, type_oid: PgTypeOid) -> Option<&TypeOverride> {
        self.overrides.get(&type_oid)
    }

    /// Registers an override. Registering the same mapping twice is a no-op,
    /// a different mapping for an already overridden type is a conflict.
    pub fn register_override(
        &mut self,
        type_oid: PgTypeOid,
        scalar: GqlScalar,
        registered_by: &'static str,
    ) -> Result<OverrideRegistration, ConflictingOverrideError> {
        if let Some(existing) = self.overrides.get(&type_oid) {
            if existing.scalar == scalar {
                return Ok(OverrideRegistration::AlreadyRegistered);
            }

            return Err(ConflictingOverrideError {
                type_oid,
                existing: existing.scalar,
                existing_hook: existing.registered_by,
                requested: scalar,
                new_hook: registered_by,
            });
        }

        self.overrides.insert(
            type_oid,
            TypeOverride {
                scalar,
                registered_by,
            },
        );

        Ok(OverrideRegistration::Registered)
    }
}

impl Default for TypeMappingRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
