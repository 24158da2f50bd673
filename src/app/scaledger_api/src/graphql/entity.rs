use live_events::EntityRow;
use schema_build::{GqlScalar, RelationDescriptor, TypeMappingRegistry, camel_case};

use crate::graphql::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityField {
    pub field_name: String,
    pub column: String,
    pub scalar: GqlScalar,
    pub not_null: bool,
}

/// Object type exposing the columns of one relation.
#[derive(Debug, Clone)]
pub struct EntityType {
    pub type_name: String,
    pub fields: Vec<EntityField>,
    pub primary_key: EntityField,
}

impl EntityType {
    /// Returns `None` when the primary key is not among the columns.
    pub fn from_relation(
        type_name: impl Into<String>,
        relation: &RelationDescriptor,
        type_mapping: &TypeMappingRegistry,
    ) -> Option<Self> {
        let fields = relation
            .columns
            .iter()
            .map(|column| EntityField {
                field_name: camel_case(&column.name),
                column: column.name.clone(),
                scalar: type_mapping.resolve(column.type_oid),
                not_null: column.not_null,
            })
            .collect::<Vec<_>>();

        let primary_key = fields
            .iter()
            .find(|f| f.column == relation.primary_key)?
            .clone();

        Some(Self {
            type_name: type_name.into(),
            fields,
            primary_key,
        })
    }

    pub fn object(&self) -> Object {
        self.fields
            .iter()
            .fold(Object::new(&self.type_name), |object, field| {
                object.field(column_field(field))
            })
    }
}

fn column_field(field: &EntityField) -> Field {
    let type_ref = if field.not_null {
        TypeRef::named_nn(field.scalar.type_name())
    } else {
        TypeRef::named(field.scalar.type_name())
    };

    let column = field.column.clone();
    let scalar = field.scalar;

    Field::new(&field.field_name, type_ref, move |ctx| {
        let column = column.clone();
        FieldFuture::new(async move {
            let row = ctx.parent_value.try_downcast_ref::<EntityRow>()?;

            match row.get(&column) {
                None | Some(serde_json::Value::Null) => Ok(None),
                Some(raw) => Ok(Some(FieldValue::value(column_value(scalar, raw)?))),
            }
        })
    })
}
