use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use zerone_core::domain::Post;
use zerone_core::ports::{Notifier, NotifyError};

use crate::config::env_or;

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationKind {
    NewPost {
        post_id: i64,
        author_id: i64,
        title: String,
    },
}

/// A queued notification and its delivery attempts so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub attempts: u32,
    pub max_attempts: u32,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, max_attempts: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            attempts: 0,
            max_attempts,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Transient failure, try again while attempts remain.
    Retry(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct NotificationQueueConfig {
    /// Maximum number of undelivered notifications.
    pub capacity: usize,
    pub workers: usize,
    pub max_attempts: u32,
    /// Base delay before a retry, multiplied by the attempt number.
    pub retry_backoff: Duration,
}

impl Default for NotificationQueueConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            workers: 2,
            max_attempts: 3,
            retry_backoff: Duration::from_millis(100),
        }
    }
}

impl NotificationQueueConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("NOTIFY_QUEUE_SIZE", defaults.capacity),
            workers: env_or("NOTIFY_WORKERS", defaults.workers),
            max_attempts: env_or("NOTIFY_MAX_ATTEMPTS", defaults.max_attempts),
            ..defaults
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub pending: usize,
    pub processing: usize,
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Default)]
struct Counters {
    pending: AtomicUsize,
    processing: AtomicUsize,
    delivered: AtomicUsize,
    failed: AtomicUsize,
}

/// Bounded in-process notification queue.
pub struct NotificationQueue {
    config: NotificationQueueConfig,
    counters: Arc<Counters>,
    sender: mpsc::Sender<Notification>,
    receiver: Arc<Mutex<mpsc::Receiver<Notification>>>,
}

impl NotificationQueue {
    pub fn new(config: NotificationQueueConfig) -> Self {
        let (sender, receiver) = mpsc::channel(config.capacity.max(1));

        Self {
            config,
            counters: Arc::new(Counters::default()),
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    pub fn from_env() -> Self {
        Self::new(NotificationQueueConfig::from_env())
    }

    /// Queue a notification without waiting for room.
    pub fn enqueue(&self, notification: Notification) -> Result<(), NotifyError> {
        self.counters.pending.fetch_add(1, Ordering::Relaxed);

        self.sender.try_send(notification).map_err(|e| {
            self.counters.pending.fetch_sub(1, Ordering::Relaxed);
            match e {
                mpsc::error::TrySendError::Full(_) => NotifyError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => NotifyError::Closed,
            }
        })
    }

    /// Spawn the configured number of workers feeding `handler`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_workers<F, Fut>(&self, handler: F)
    where
        F: Fn(Notification) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Delivery> + Send + 'static,
    {
        let handler = Arc::new(handler);

        for worker in 0..self.config.workers.max(1) {
            let handler = handler.clone();
            let receiver = self.receiver.clone();
            let counters = self.counters.clone();
            let sender = self.sender.clone();
            let backoff = self.config.retry_backoff;

            tokio::spawn(async move {
                tracing::info!(worker, "Notification worker started");

                loop {
                    let next = receiver.lock().await.recv().await;
                    let Some(mut notification) = next else {
                        tracing::info!(worker, "Notification worker shutting down");
                        break;
                    };

                    counters.pending.fetch_sub(1, Ordering::Relaxed);
                    counters.processing.fetch_add(1, Ordering::Relaxed);
                    notification.attempts += 1;

                    let outcome = handler(notification.clone()).await;
                    counters.processing.fetch_sub(1, Ordering::Relaxed);

                    match outcome {
                        Delivery::Delivered => {
                            counters.delivered.fetch_add(1, Ordering::Relaxed);
                            tracing::debug!(
                                notification_id = %notification.id,
                                "Notification delivered"
                            );
                        }
                        Delivery::Retry(reason)
                            if notification.attempts < notification.max_attempts =>
                        {
                            tracing::warn!(
                                notification_id = %notification.id,
                                attempt = notification.attempts,
                                reason = %reason,
                                "Notification delivery failed, retrying"
                            );
                            counters.pending.fetch_add(1, Ordering::Relaxed);
                            let sender = sender.clone();
                            let counters = counters.clone();
                            let delay = backoff * notification.attempts;
                            tokio::spawn(async move {
                                tokio::time::sleep(delay).await;
                                if sender.send(notification).await.is_err() {
                                    counters.pending.fetch_sub(1, Ordering::Relaxed);
                                    counters.failed.fetch_add(1, Ordering::Relaxed);
                                    tracing::error!("Queue closed before notification retry");
                                }
                            });
                        }
                        Delivery::Retry(reason) | Delivery::Failed(reason) => {
                            counters.failed.fetch_add(1, Ordering::Relaxed);
                            tracing::error!(
                                notification_id = %notification.id,
                                attempts = notification.attempts,
                                reason = %reason,
                                "Notification dropped"
                            );
                        }
                    }
                }
            });
        }
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            pending: self.counters.pending.load(Ordering::Relaxed),
            processing: self.counters.processing.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl Notifier for NotificationQueue {
    async fn notify_new_post(&self, post: &Post) -> Result<(), NotifyError> {
        let kind = NotificationKind::NewPost {
            post_id: post.id,
            author_id: post.author_id,
            title: post.title.clone(),
        };
        self.enqueue(Notification::new(kind, self.config.max_attempts))
    }
}
