use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use zerone_core::domain::{Comment, NewComment};
use zerone_core::error::{DomainError, RepoError};
use zerone_core::pagination::{Page, PageRequest};
use zerone_core::ports::{BaseRepository, CommentMutation, CommentRepository};

use super::{Tables, next_id};

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCommentRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl BaseRepository<Comment, i64> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        match tables.comments.get_mut(&comment.id) {
            Some(stored) => {
                *stored = comment.clone();
                Ok(comment)
            }
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.posts.contains_key(&new_comment.post_id) {
            return Err(RepoError::Constraint("post_comment_post_id_fkey".to_string()));
        }
        if !tables.users.contains_key(&new_comment.author_id) {
            return Err(RepoError::Constraint("post_comment_author_id_fkey".to_string()));
        }
        if let Some(parent_id) = new_comment.parent_id {
            if !tables.comments.contains_key(&parent_id) {
                return Err(RepoError::Constraint("post_comment_parent_id_fkey".to_string()));
            }
        }

        let comment = new_comment.into_comment(next_id(&mut tables.comment_seq));
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_page(
        &self,
        post_id: i64,
        page: PageRequest,
    ) -> Result<Page<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let matching = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id && !c.is_deleted)
            .cloned();

        Ok(page.window(matching))
    }

    async fn modify(&self, id: i64, mutation: CommentMutation) -> Result<Comment, DomainError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .comments
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Comment", id))?;

        let mut comment = stored.clone();
        mutation(&mut comment)?;
        *stored = comment.clone();

        Ok(comment)
    }
}
