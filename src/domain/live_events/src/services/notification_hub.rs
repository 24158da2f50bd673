use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::entities::NotificationEvent;

/// In-process fan-out of notifications to subscription streams.
pub struct NotificationHub {
    sender: broadcast::Sender<NotificationEvent>,
}

impl NotificationHub {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns the number of subscribers the event was handed to.
    pub fn publish(&self, event: NotificationEvent) -> usize {
        // Sending fails only when nobody is subscribed
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Events published after this call for the given topic.
    pub fn subscribe(&self, topic: &str) -> BoxStream<'static, NotificationEvent> {
        let receiver = self.sender.subscribe();

        futures::stream::unfold(
            (receiver, topic.to_string()),
            |(mut receiver, topic)| async move {
                loop {
                    match receiver.recv().await {
                        Ok(event) if event.topic == topic => {
                            return Some((event, (receiver, topic)));
                        }
                        Ok(_) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(%topic, skipped, "Subscriber lagged behind, events dropped");
                        }
                        Err(RecvError::Closed) => return None,
                    }
                }
            },
        )
        .boxed()
    }
}
