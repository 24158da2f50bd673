use std::sync::Arc;

use async_graphql::SDLExportOptions;
use live_events::{EventPayloadResolver, NotificationHub, ScopedRowReader, TargetRelation};
use schema_build::{
    GqlScalar,
    RelationDescriptor,
    SchemaBuild,
    TypeMappingRegistry,
    upper_camel_case,
};

use crate::graphql::entity::EntityType;
use crate::graphql::prelude::*;
use crate::graphql::root::{QUERY_TYPE_NAME, query_object};
use crate::graphql::subscriptions::SubscriptionTopic;
use crate::metrics::ApiMetrics;

pub type Schema = async_graphql::dynamic::Schema;

pub const SUBSCRIPTION_TYPE_NAME: &str = "Subscription";

#[derive(thiserror::Error, Debug)]
pub enum SchemaAssemblyError {
    #[error("Primary key '{primary_key}' is not a column of '{relation}'")]
    PrimaryKeyNotFound {
        relation: String,
        primary_key: String,
    },

    #[error("Invalid schema: {0}")]
    Invalid(String),
}

/// Capabilities the resolvers are wired with.
#[derive(Clone)]
pub struct SchemaDeps {
    pub row_reader: Arc<dyn ScopedRowReader>,
    pub notification_hub: Arc<NotificationHub>,
    pub metrics: Arc<ApiMetrics>,
}

/// Assembles the schema from the relation metadata and the outcome of the
/// build hooks.
pub fn build_schema(
    relation: &RelationDescriptor,
    build: &SchemaBuild,
    topic: &SubscriptionTopic,
    deps: SchemaDeps,
) -> Result<Schema, SchemaAssemblyError> {
    let entity_type_name = upper_camel_case(topic.entity_field_name.as_str());

    let entity = EntityType::from_relation(&entity_type_name, relation, &build.type_mapping)
        .ok_or_else(|| SchemaAssemblyError::PrimaryKeyNotFound {
            relation: format!("{}.{}", relation.schema, relation.name),
            primary_key: relation.primary_key.clone(),
        })?;

    let resolver = Arc::new(EventPayloadResolver::new(target_relation(
        relation,
        &build.type_mapping,
    )?));

    let query = query_object(
        &entity,
        resolver.clone(),
        deps.row_reader.clone(),
        deps.metrics.clone(),
    );

    let subscription = Subscription::new(SUBSCRIPTION_TYPE_NAME).field(topic.subscription_field(
        resolver,
        deps.row_reader,
        deps.notification_hub,
        deps.metrics,
    ));

    let schema_builder = GqlScalar::CUSTOM.into_iter().fold(
        Schema::build(QUERY_TYPE_NAME, None, Some(SUBSCRIPTION_TYPE_NAME)),
        |schema_builder, scalar| schema_builder.register(custom_scalar(scalar)),
    );

    schema_builder
        .register(entity.object())
        .register(topic.payload_object(&entity.type_name))
        .register(query)
        .register(subscription)
        .extension(async_graphql::extensions::Tracing)
        .finish()
        .map_err(|e| SchemaAssemblyError::Invalid(e.to_string()))
}

/// Columns exposed as string-encoded scalars are read as text.
pub fn target_relation(
    relation: &RelationDescriptor,
    type_mapping: &TypeMappingRegistry,
) -> Result<TargetRelation, SchemaAssemblyError> {
    let primary_key = relation.primary_key_column().ok_or_else(|| {
        SchemaAssemblyError::PrimaryKeyNotFound {
            relation: format!("{}.{}", relation.schema, relation.name),
            primary_key: relation.primary_key.clone(),
        }
    })?;

    Ok(TargetRelation {
        schema: relation.schema.clone(),
        name: relation.name.clone(),
        primary_key: primary_key.name.clone(),
        primary_key_sql_type: primary_key.sql_type.clone(),
        text_columns: relation
            .columns
            .iter()
            .filter(|column| type_mapping.resolve(column.type_oid).is_string_encoded())
            .map(|column| column.name.clone())
            .collect(),
    })
}

/// SDL with sorted fields and arguments, so exports are stable.
pub fn export_sdl(schema: &Schema) -> String {
    schema.sdl_with_options(SDLExportOptions::new().sorted_fields().sorted_arguments())
}
