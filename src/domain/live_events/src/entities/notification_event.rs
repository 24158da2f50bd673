use serde::Deserialize;

use crate::entities::{InvalidSubjectError, SubjectId};

/// A change notification delivered for one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub topic: String,
    /// Event tag as published by the database, the topic when absent
    pub event: String,
    pub subject: SubjectId,
}

#[derive(thiserror::Error, Debug)]
pub enum NotificationParseError {
    #[error("Invalid notification payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidSubject(#[from] InvalidSubjectError),
}

#[derive(Deserialize)]
struct NotificationPayloadDto {
    event: Option<String>,
    subject: serde_json::Value,
}

impl NotificationEvent {
    pub fn new(topic: impl Into<String>, subject: impl Into<SubjectId>) -> Self {
        let topic = topic.into();
        Self {
            event: topic.clone(),
            topic,
            subject: subject.into(),
        }
    }

    /// Parses a payload of the form `{"event": "...", "subject": 42}`.
    pub fn from_payload(
        topic: impl Into<String>,
        payload: &str,
    ) -> Result<Self, NotificationParseError> {
        let dto: NotificationPayloadDto = serde_json::from_str(payload)?;
        let subject = SubjectId::from_json(&dto.subject)?;
        let topic = topic.into();

        Ok(Self {
            event: dto.event.unwrap_or_else(|| topic.clone()),
            topic,
            subject,
        })
    }
}
