use std::sync::Arc;

use live_events::{EventPayloadResolver, ScopedRowReader};

use crate::graphql::entity::EntityType;
use crate::graphql::prelude::*;
use crate::metrics::ApiMetrics;

pub const QUERY_TYPE_NAME: &str = "Query";

pub fn query_object(
    entity: &EntityType,
    resolver: Arc<EventPayloadResolver>,
    row_reader: Arc<dyn ScopedRowReader>,
    metrics: Arc<ApiMetrics>,
) -> Object {
    Object::new(QUERY_TYPE_NAME)
        .field(
            Field::new("version", TypeRef::named_nn(TypeRef::STRING), |_| {
                FieldFuture::new(async { Ok(Some(FieldValue::value(version_string()))) })
            })
            .description("Returns API version information"),
        )
        .field(lookup_field(entity, resolver, row_reader, metrics))
}

/// `posting(id: Int!): Posting`
fn lookup_field(
    entity: &EntityType,
    resolver: Arc<EventPayloadResolver>,
    row_reader: Arc<dyn ScopedRowReader>,
    metrics: Arc<ApiMetrics>,
) -> Field {
    let field_name = lowercase_first(&entity.type_name);
    let argument_name = entity.primary_key.field_name.clone();
    let primary_key_scalar = entity.primary_key.scalar;

    Field::new(field_name, TypeRef::named(&entity.type_name), {
        let argument_name = argument_name.clone();
        move |ctx| {
            let argument_name = argument_name.clone();
            let resolver = resolver.clone();
            let row_reader = row_reader.clone();
            let metrics = metrics.clone();

            FieldFuture::new(async move {
                let argument = ctx.args.try_get(&argument_name)?;
                let subject = subject_from_argument(primary_key_scalar, argument.as_value())?;

                metrics.entity_lookups_num.inc();

                let maybe_row = resolver
                    .fetch_by_subject(&subject, row_reader.as_ref())
                    .await?;

                Ok(maybe_row.map(FieldValue::owned_any))
            })
        }
    })
    .argument(InputValue::new(
        argument_name,
        TypeRef::named_nn(primary_key_scalar.type_name()),
    ))
    .description(format!("Reads a single `{}` by its primary key", entity.type_name))
}

fn lowercase_first(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");

    match option_env!("VERGEN_RUSTC_SEMVER") {
        Some(rustc) => format!("{version} (rustc {rustc})"),
        None => version.to_string(),
    }
}
