use crate::entities::{
    EntityRow,
    NotificationEvent,
    RowFilter,
    SubjectId,
    SubscriptionPayload,
    TargetRelation,
};
use crate::services::{RowReadError, ScopedRowReader};

#[derive(thiserror::Error, Debug)]
pub enum PayloadResolutionError {
    #[error("Failed to read '{relation}' row for subject '{subject}': {source}")]
    Retrieval {
        relation: String,
        subject: SubjectId,
        source: RowReadError,
    },
}

/// Hydrates notification events into the rows they refer to.
///
/// Every resolution issues exactly one read through the reader it is given
/// and keeps no state between calls.
#[derive(Debug, Clone)]
pub struct EventPayloadResolver {
    relation: TargetRelation,
}

impl EventPayloadResolver {
    pub fn new(relation: TargetRelation) -> Self {
        Self { relation }
    }

    pub fn build_filter(&self, subject: &SubjectId) -> RowFilter {
        RowFilter::PrimaryKeyEquals {
            column: self.relation.primary_key.clone(),
            value: subject.clone(),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(relation = %self.relation, %subject))]
    pub async fn fetch_by_subject(
        &self,
        subject: &SubjectId,
        row_reader: &dyn ScopedRowReader,
    ) -> Result<Option<EntityRow>, PayloadResolutionError> {
        let filter = self.build_filter(subject);

        let rows = row_reader
            .select_rows(&self.relation, &filter)
            .await
            .map_err(|source| PayloadResolutionError::Retrieval {
                relation: self.relation.to_string(),
                subject: subject.clone(),
                source,
            })?;

        if rows.len() > 1 {
            tracing::warn!(
                rows = rows.len(),
                "Primary key filter matched more than one row, using the first one"
            );
        }

        Ok(rows.into_iter().next())
    }

    pub async fn resolve_entity(
        &self,
        event: &NotificationEvent,
        row_reader: &dyn ScopedRowReader,
    ) -> Result<Option<EntityRow>, PayloadResolutionError> {
        self.fetch_by_subject(&event.subject, row_reader).await
    }

    pub async fn resolve(
        &self,
        event: NotificationEvent,
        row_reader: &dyn ScopedRowReader,
    ) -> SubscriptionPayload {
        let entity = self.resolve_entity(&event, row_reader).await;

        match &entity {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::debug!(subject = %event.subject, "Notification subject no longer exists");
            }
            Err(e) => {
                tracing::warn!(error = %e, topic = %event.topic, "Payload resolution failed");
            }
        }

        SubscriptionPayload {
            event: event.event,
            entity,
        }
    }
}
