//! Application state - shared across all handlers.

use std::sync::Arc;

use zerone_core::ports::{
    CommentRepository, Notifier, PostRepository, TagRepository, UserRepository,
};
use zerone_core::services::{CommentService, PostService, TagService};
use zerone_infra::{DatabaseConfig, MemoryStore, NotificationQueue};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: PostService,
    pub tags: TagService,
    pub comments: CommentService,
    pub notifications: Arc<NotificationQueue>,
}

impl AppState {
    /// Connect to PostgreSQL when configured, otherwise use the in-memory store.
    pub async fn new(
        db_config: Option<&DatabaseConfig>,
        notifications: Arc<NotificationQueue>,
    ) -> Self {
        if let Some(config) = db_config {
            if let Some(state) = Self::postgres(config, notifications.clone()).await {
                return state;
            }
        }

        tracing::warn!("Running on the in-memory store, data is lost on restart");
        Self::in_memory(notifications)
    }

    #[cfg(feature = "postgres")]
    async fn postgres(
        config: &DatabaseConfig,
        notifications: Arc<NotificationQueue>,
    ) -> Option<Self> {
        use zerone_infra::database::{
            PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
            PostgresUserRepository, connect,
        };

        match connect(config).await {
            Ok(conn) => Some(Self::assemble(
                Arc::new(PostgresUserRepository::new(conn.clone())),
                Arc::new(PostgresPostRepository::new(conn.clone())),
                Arc::new(PostgresTagRepository::new(conn.clone())),
                Arc::new(PostgresCommentRepository::new(conn)),
                notifications,
            )),
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database");
                None
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn postgres(
        _config: &DatabaseConfig,
        _notifications: Arc<NotificationQueue>,
    ) -> Option<Self> {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        None
    }

    pub fn in_memory(notifications: Arc<NotificationQueue>) -> Self {
        let store = MemoryStore::new();
        Self::assemble(
            Arc::new(store.users()),
            Arc::new(store.posts()),
            Arc::new(store.tags()),
            Arc::new(store.comments()),
            notifications,
        )
    }

    fn assemble(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        comments: Arc<dyn CommentRepository>,
        notifications: Arc<NotificationQueue>,
    ) -> Self {
        let notifier: Arc<dyn Notifier> = notifications.clone();
        Self {
            users,
            posts: PostService::new(posts.clone(), notifier),
            tags: TagService::new(tags),
            comments: CommentService::new(posts, comments),
            notifications,
        }
    }
}
