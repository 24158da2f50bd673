use std::sync::Arc;

use futures::StreamExt;
use live_events::{EventPayloadResolver, NotificationHub, ScopedRowReader, SubscriptionPayload};

use crate::graphql::DeliveryErrors;
use crate::graphql::prelude::*;
use crate::metrics::ApiMetrics;

/// A root subscription field bound to a notification topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTopic {
    pub field_name: String,
    pub topic: String,
    pub payload_type_name: String,
    /// Payload member holding the hydrated row
    pub entity_field_name: String,
}

impl SubscriptionTopic {
    pub fn posting_created() -> Self {
        Self {
            field_name: "postingCreated".to_string(),
            topic: "posting_created".to_string(),
            payload_type_name: "PostingCreatedSubscriptionPayload".to_string(),
            entity_field_name: "posting".to_string(),
        }
    }

    pub fn payload_object(&self, entity_type_name: &str) -> Object {
        Object::new(&self.payload_type_name)
            .field(
                Field::new(
                    &self.entity_field_name,
                    TypeRef::named(entity_type_name),
                    |ctx| {
                        FieldFuture::new(async move {
                            let payload = ctx.parent_value.try_downcast_ref::<SubscriptionPayload>()?;

                            match &payload.entity {
                                Ok(Some(row)) => Ok(Some(FieldValue::owned_any(row.clone()))),
                                Ok(None) => Ok(None),
                                Err(e) => {
                                    let error = GqlError::new(e.to_string());

                                    match ctx.data_opt::<DeliveryErrors>() {
                                        Some(delivery_errors) => {
                                            delivery_errors.push(ctx.set_error_path(
                                                error.into_server_error(ctx.item.pos),
                                            ));
                                            Ok(None)
                                        }
                                        None => Err(error),
                                    }
                                }
                            }
                        })
                    },
                )
                .description("Row the event refers to, null when it no longer exists"),
            )
            .field(
                Field::new("event", TypeRef::named(TypeRef::STRING), |ctx| {
                    FieldFuture::new(async move {
                        let payload = ctx.parent_value.try_downcast_ref::<SubscriptionPayload>()?;
                        Ok(Some(FieldValue::value(payload.event.clone())))
                    })
                })
                .description("Event tag as published by the database"),
            )
    }

    /// Every delivered event is resolved once, before any payload member is
    /// read, so selecting the entity several times does not cause extra reads.
    pub fn subscription_field(
        &self,
        resolver: Arc<EventPayloadResolver>,
        row_reader: Arc<dyn ScopedRowReader>,
        notification_hub: Arc<NotificationHub>,
        metrics: Arc<ApiMetrics>,
    ) -> SubscriptionField {
        let topic = self.topic.clone();

        SubscriptionField::new(
            &self.field_name,
            TypeRef::named(&self.payload_type_name),
            move |_ctx| {
                let topic = topic.clone();
                let resolver = resolver.clone();
                let row_reader = row_reader.clone();
                let notification_hub = notification_hub.clone();
                let metrics = metrics.clone();

                SubscriptionFieldFuture::new(async move {
                    tracing::debug!(%topic, "Subscription started");

                    let deliveries = notification_hub.subscribe(&topic).then(move |event| {
                        let resolver = resolver.clone();
                        let row_reader = row_reader.clone();
                        let metrics = metrics.clone();

                        async move {
                            let payload = resolver.resolve(event, row_reader.as_ref()).await;
                            metrics.record_delivery(&payload);
                            Ok::<_, GqlError>(FieldValue::owned_any(payload))
                        }
                    });

                    Ok(deliveries)
                })
            },
        )
        .description(format!("Triggered by `{}` notifications", self.topic))
    }
}
