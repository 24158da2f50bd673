use std::sync::Arc;
use std::time::Duration;

use live_events::{NotificationEvent, NotificationHub};
use sqlx::PgPool;
use sqlx::postgres::PgListener;

const RECV_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Forwards `NOTIFY` messages of the configured topics into a
/// [`NotificationHub`].
///
/// Topic `posting_created` is listened to on channel
/// `{channel_prefix}posting_created`.
pub struct PgNotificationListener {
    pool: PgPool,
    channel_prefix: String,
    topics: Vec<String>,
    hub: Arc<NotificationHub>,
    reconnect_delay: Duration,
}

impl PgNotificationListener {
    pub fn new(
        pool: PgPool,
        channel_prefix: impl Into<String>,
        topics: Vec<String>,
        hub: Arc<NotificationHub>,
        reconnect_delay: Duration,
    ) -> Self {
        Self {
            pool,
            channel_prefix: channel_prefix.into(),
            topics,
            hub,
            reconnect_delay,
        }
    }

    pub fn channel_name(&self, topic: &str) -> String {
        format!("{}{topic}", self.channel_prefix)
    }

    pub fn topic_of_channel<'a>(&self, channel: &'a str) -> Option<&'a str> {
        channel
            .strip_prefix(&self.channel_prefix)
            .filter(|topic| self.topics.iter().any(|t| t == topic))
    }

    /// Runs until cancelled. Failing to connect or to subscribe is logged and
    /// retried after `reconnect_delay`, receive errors are logged as well.
    pub async fn run(&self) {
        loop {
            let mut listener = match self.listen().await {
                Ok(listener) => listener,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        retry_in = ?self.reconnect_delay,
                        "Subscribing to notification channels failed"
                    );
                    tokio::time::sleep(self.reconnect_delay).await;
                    continue;
                }
            };

            loop {
                match listener.recv().await {
                    Ok(notification) => {
                        self.dispatch(notification.channel(), notification.payload());
                    }
                    Err(e) => {
                        // The listener reconnects on the next `recv()`
                        tracing::error!(error = %e, "Receiving notification failed");
                        tokio::time::sleep(RECV_ERROR_BACKOFF).await;
                    }
                }
            }
        }
    }

    async fn listen(&self) -> Result<PgListener, sqlx::Error> {
        let mut listener = PgListener::connect_with(&self.pool).await?;

        let channels = self
            .topics
            .iter()
            .map(|topic| self.channel_name(topic))
            .collect::<Vec<_>>();
        listener
            .listen_all(channels.iter().map(String::as_str))
            .await?;

        tracing::info!(?channels, "Listening for notifications");

        Ok(listener)
    }

    pub fn dispatch(&self, channel: &str, payload: &str) -> Option<usize> {
        let Some(topic) = self.topic_of_channel(channel) else {
            tracing::debug!(channel, "Ignoring notification on unknown channel");
            return None;
        };

        match NotificationEvent::from_payload(topic, payload) {
            Ok(event) => {
                tracing::debug!(topic, subject = %event.subject, "Notification received");
                Some(self.hub.publish(event))
            }
            Err(e) => {
                tracing::warn!(topic, payload, error = %e, "Dropping malformed notification");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn listener_for(database_url: &str, hub: Arc<NotificationHub>) -> PgNotificationListener {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(50))
            .connect_lazy(database_url)
            .unwrap();

        PgNotificationListener::new(
            pool,
            "postgraphile:",
            vec!["posting_created".to_string()],
            hub,
            Duration::from_millis(10),
        )
    }

    fn listener(hub: Arc<NotificationHub>) -> PgNotificationListener {
        listener_for("postgres://localhost/scaledger", hub)
    }

    #[tokio::test]
    async fn test_channel_mapping() {
        let listener = listener(Arc::new(NotificationHub::new(4)));

        assert_eq!("postgraphile:posting_created", listener.channel_name("posting_created"));
        assert_eq!(
            Some("posting_created"),
            listener.topic_of_channel("postgraphile:posting_created")
        );
        assert_eq!(None, listener.topic_of_channel("postgraphile:posting_deleted"));
        assert_eq!(None, listener.topic_of_channel("posting_created"));
    }

    #[tokio::test]
    async fn test_dispatch_publishes_parsed_events() {
        let hub = Arc::new(NotificationHub::new(4));
        let listener = listener(hub.clone());
        let _subscription = hub.subscribe("posting_created");

        assert_eq!(
            Some(1),
            listener.dispatch(
                "postgraphile:posting_created",
                r#"{"event": "posting_created", "subject": 42}"#
            )
        );
        assert_eq!(
            None,
            listener.dispatch("postgraphile:posting_created", "not json")
        );
        assert_eq!(
            None,
            listener.dispatch("postgraphile:other", r#"{"subject": 1}"#)
        );
    }

    #[tokio::test]
    async fn test_run_keeps_retrying_while_database_is_unreachable() {
        let listener = listener_for(
            "postgres://scaledger@127.0.0.1:1/scaledger",
            Arc::new(NotificationHub::new(4)),
        );

        let outcome = tokio::time::timeout(Duration::from_millis(300), listener.run()).await;

        assert!(outcome.is_err(), "listener stopped instead of reconnecting");
    }
}
