//! Delivery of queued new-post notifications.

use zerone_infra::NotificationQueue;
use zerone_infra::notify::{Delivery, Notification, NotificationKind};

/// Spawn the notification workers. Delivery is recorded in the log only.
pub fn start_notification_workers(queue: &NotificationQueue) {
    queue.start_workers(|notification: Notification| async move { deliver(&notification) });
    tracing::info!("Notification workers started");
}

fn deliver(notification: &Notification) -> Delivery {
    match &notification.kind {
        NotificationKind::NewPost {
            post_id,
            author_id,
            title,
        } => {
            tracing::info!(
                notification_id = %notification.id,
                post_id,
                author_id,
                title = %title,
                "New post published"
            );
        }
    }
    Delivery::Delivered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_is_delivered() {
        let notification = Notification::new(
            NotificationKind::NewPost {
                post_id: 1,
                author_id: 2,
                title: "hello".to_string(),
            },
            3,
        );

        assert_eq!(deliver(&notification), Delivery::Delivered);
    }
}
