//! Comment threads under posts.

use std::sync::Arc;

use crate::domain::{Comment, NewComment, Owned, ensure_owner};
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::ports::{CommentRepository, CurrentActor, PostRepository};

/// Text and optional parent of a comment as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct CommentDraft {
    pub parent_id: Option<i64>,
    pub comment_text: String,
}

/// The comment must sit under `post_id` and belong to `actor_id`.
fn check_scope(comment: &Comment, post_id: i64, actor_id: i64) -> Result<(), DomainError> {
    if comment.post_id != post_id {
        return Err(DomainError::not_found("Comment", comment.id));
    }
    ensure_owner(comment.owner_id(), actor_id)
}

/// Comment service.
#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    /// Comment on a live post as the current actor.
    ///
    /// A reply's parent must be a non-deleted comment on the same post.
    pub async fn create_comment(
        &self,
        actor: &dyn CurrentActor,
        post_id: i64,
        draft: CommentDraft,
    ) -> Result<Comment, DomainError> {
        let author_id = actor.actor_id();
        let new_comment = NewComment::new(post_id, draft.parent_id, author_id, draft.comment_text)?;

        match self.posts.find_by_id(post_id).await? {
            Some(post) if !post.is_deleted => {}
            _ => return Err(DomainError::not_found("Post", post_id)),
        }

        if let Some(parent_id) = draft.parent_id {
            let parent = self
                .comments
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Comment", parent_id))?;
            if parent.post_id != post_id || parent.is_deleted {
                return Err(DomainError::Validation(format!(
                    "comment {parent_id} is not a live comment on post {post_id}"
                )));
            }
        }

        let comment = self.comments.insert(new_comment).await?;
        tracing::info!(comment_id = comment.id, post_id, author_id, "Comment created");
        Ok(comment)
    }

    /// A post's non-deleted comments, oldest first.
    pub async fn get_comments(
        &self,
        post_id: i64,
        page: PageRequest,
    ) -> Result<Page<Comment>, DomainError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::not_found("Post", post_id));
        }
        Ok(self.comments.find_page(post_id, page).await?)
    }

    pub async fn edit_comment(
        &self,
        actor: &dyn CurrentActor,
        post_id: i64,
        id: i64,
        comment_text: String,
    ) -> Result<Comment, DomainError> {
        let actor_id = actor.actor_id();
        let comment = self
            .comments
            .modify(
                id,
                Box::new(move |comment: &mut Comment| -> Result<(), DomainError> {
                    check_scope(comment, post_id, actor_id)?;
                    comment.edit(comment_text)
                }),
            )
            .await?;
        tracing::info!(comment_id = id, post_id, actor_id, "Comment edited");
        Ok(comment)
    }

    /// Soft-delete a comment owned by the actor.
    pub async fn delete_comment(
        &self,
        actor: &dyn CurrentActor,
        post_id: i64,
        id: i64,
    ) -> Result<Comment, DomainError> {
        let actor_id = actor.actor_id();
        let comment = self
            .comments
            .modify(
                id,
                Box::new(move |comment: &mut Comment| -> Result<(), DomainError> {
                    check_scope(comment, post_id, actor_id)?;
                    comment.mark_deleted();
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(comment_id = id, post_id, actor_id, "Comment deleted");
        Ok(comment)
    }

    pub async fn recover_comment(
        &self,
        actor: &dyn CurrentActor,
        post_id: i64,
        id: i64,
    ) -> Result<Comment, DomainError> {
        let actor_id = actor.actor_id();
        let comment = self
            .comments
            .modify(
                id,
                Box::new(move |comment: &mut Comment| -> Result<(), DomainError> {
                    check_scope(comment, post_id, actor_id)?;
                    comment.recover();
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(comment_id = id, post_id, actor_id, "Comment recovered");
        Ok(comment)
    }
}
