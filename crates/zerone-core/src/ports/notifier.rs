//! Notification port - tells interested users about new activity.

use async_trait::async_trait;

use crate::domain::Post;

/// Fire-and-forget notification sink.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announce a freshly published post.
    async fn notify_new_post(&self, post: &Post) -> Result<(), NotifyError>;
}

/// Notification errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification queue is full")]
    QueueFull,

    #[error("Notification queue is closed")]
    Closed,
}
