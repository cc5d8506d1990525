//! Asynchronous new-post notifications.
//!
//! Publishing a post only enqueues a [`Notification`]; local workers deliver
//! it later. Pending notifications are lost on restart.

mod queue;

pub use queue::{
    Delivery, Notification, NotificationKind, NotificationQueue, NotificationQueueConfig,
    QueueStats,
};
