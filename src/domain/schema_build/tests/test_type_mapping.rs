use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use schema_build::{
    ForceBigIntHook,
    GqlScalar,
    OverrideRegistration,
    PgTypeOid,
    SchemaBuild,
    SchemaBuildError,
    SchemaBuildHook,
    SchemaBuildPipeline,
    TypeMappingRegistry,
};

#[rstest]
#[case(PgTypeOid::INT2, GqlScalar::Int)]
#[case(PgTypeOid::INT4, GqlScalar::Int)]
#[case(PgTypeOid::INT8, GqlScalar::BigInt)]
#[case(PgTypeOid::NUMERIC, GqlScalar::BigFloat)]
#[case(PgTypeOid::TEXT, GqlScalar::String)]
#[case(PgTypeOid::TIMESTAMPTZ, GqlScalar::Datetime)]
#[case(PgTypeOid::JSONB, GqlScalar::Json)]
#[case(PgTypeOid(600), GqlScalar::String)]
fn test_default_mappings(#[case] type_oid: PgTypeOid, #[case] expected: GqlScalar) {
    assert_eq!(expected, TypeMappingRegistry::with_defaults().resolve(type_oid));
}

#[test]
fn test_force_big_int_hook_narrows_int8() {
    let build = SchemaBuildPipeline::new()
        .with_hook(Arc::new(ForceBigIntHook))
        .run(SchemaBuild::default())
        .unwrap();

    assert_eq!(GqlScalar::Int, build.type_mapping.resolve(PgTypeOid::INT8));
    assert_eq!(
        "ForceBigIntHook",
        build
            .type_mapping
            .override_for(PgTypeOid::INT8)
            .unwrap()
            .registered_by
    );
    // Other mappings stay untouched
    assert_eq!(GqlScalar::BigFloat, build.type_mapping.resolve(PgTypeOid::NUMERIC));
}

#[test]
fn test_force_big_int_hook_applied_twice_is_a_no_op() {
    let build = SchemaBuildPipeline::new()
        .with_hook(Arc::new(ForceBigIntHook))
        .with_hook(Arc::new(ForceBigIntHook))
        .run(SchemaBuild::default())
        .unwrap();

    assert_eq!(GqlScalar::Int, build.type_mapping.resolve(PgTypeOid::INT8));
}

#[test]
fn test_override_of_unused_type_is_registered_silently() {
    let mut registry = TypeMappingRegistry::with_defaults();

    assert_eq!(
        Ok(OverrideRegistration::Registered),
        registry.register_override(PgTypeOid(999_999), GqlScalar::Int, "test")
    );
    assert_eq!(
        Ok(OverrideRegistration::AlreadyRegistered),
        registry.register_override(PgTypeOid(999_999), GqlScalar::Int, "test")
    );
}

#[test]
fn test_conflicting_override_fails_the_build() {
    let e = SchemaBuildPipeline::new()
        .with_hook(Arc::new(ForceBigIntHook))
        .with_hook(Arc::new(Int8AsStringHook))
        .run(SchemaBuild::default())
        .unwrap_err();

    assert!(matches!(e, SchemaBuildError::ConflictingOverride(_)));
    assert_eq!(
        "Conflicting mapping for type '20': 'ForceBigIntHook' maps it to Int, 'Int8AsStringHook' \
         tried String",
        e.to_string()
    );
}

#[test]
fn test_hooks_run_in_registration_order() {
    let pipeline = SchemaBuildPipeline::new()
        .with_hook(Arc::new(Int8AsStringHook))
        .with_hook(Arc::new(ForceBigIntHook));

    assert_eq!(vec!["Int8AsStringHook", "ForceBigIntHook"], pipeline.hook_names());

    // The first hook wins the type, the second one conflicts
    let e = pipeline.run(SchemaBuild::default()).unwrap_err();

    assert_eq!(
        "Conflicting mapping for type '20': 'Int8AsStringHook' maps it to String, \
         'ForceBigIntHook' tried Int",
        e.to_string()
    );
}

struct Int8AsStringHook;

impl SchemaBuildHook for Int8AsStringHook {
    fn name(&self) -> &'static str {
        "Int8AsStringHook"
    }

    fn build(&self, mut build: SchemaBuild) -> Result<SchemaBuild, SchemaBuildError> {
        build
            .type_mapping
            .register_override(PgTypeOid::INT8, GqlScalar::String, self.name())?;
        Ok(build)
    }
}
