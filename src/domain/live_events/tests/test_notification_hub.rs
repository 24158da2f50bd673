use futures::StreamExt;
use live_events::{NotificationEvent, NotificationHub};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_subscribers_receive_only_their_topic() {
    let hub = NotificationHub::new(16);
    let mut created = hub.subscribe("posting_created");
    let mut deleted = hub.subscribe("posting_deleted");

    assert_eq!(2, hub.subscriber_count());

    hub.publish(NotificationEvent::new("posting_deleted", 1));
    hub.publish(NotificationEvent::new("posting_created", 2));

    assert_eq!(
        Some(NotificationEvent::new("posting_created", 2)),
        created.next().await
    );
    assert_eq!(
        Some(NotificationEvent::new("posting_deleted", 1)),
        deleted.next().await
    );
}

#[tokio::test]
async fn test_every_subscriber_gets_its_own_copy() {
    let hub = NotificationHub::new(16);
    let mut first = hub.subscribe("posting_created");
    let mut second = hub.subscribe("posting_created");

    assert_eq!(2, hub.publish(NotificationEvent::new("posting_created", 5)));

    assert_eq!(Some(NotificationEvent::new("posting_created", 5)), first.next().await);
    assert_eq!(Some(NotificationEvent::new("posting_created", 5)), second.next().await);
}

#[tokio::test]
async fn test_publish_without_subscribers_is_dropped() {
    let hub = NotificationHub::new(16);

    assert_eq!(0, hub.publish(NotificationEvent::new("posting_created", 1)));
}

#[tokio::test]
async fn test_lagging_subscriber_skips_overflowed_events() {
    let hub = NotificationHub::new(2);
    let mut stream = hub.subscribe("posting_created");

    for i in 0..4 {
        hub.publish(NotificationEvent::new("posting_created", i));
    }

    // The two oldest events were overwritten
    assert_eq!(Some(NotificationEvent::new("posting_created", 2)), stream.next().await);
    assert_eq!(Some(NotificationEvent::new("posting_created", 3)), stream.next().await);
}
