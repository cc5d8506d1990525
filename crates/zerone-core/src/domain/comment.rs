use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ownership::Owned;
use super::{require_text, time};
use crate::error::DomainError;

/// Comment on a post. Replies point at their parent comment on the same post.
///
/// Like posts, comments are soft-deleted; `deleted_at` records when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub time: NaiveDateTime,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub author_id: i64,
    pub comment_text: String,
    pub is_blocked: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Comment {
    pub fn edit(&mut self, comment_text: String) -> Result<(), DomainError> {
        require_text("comment_text", &comment_text)?;
        self.comment_text = comment_text;
        Ok(())
    }

    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.deleted_at = Some(time::local_now());
    }

    pub fn recover(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> i64 {
        self.author_id
    }
}

/// A comment that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub author_id: i64,
    pub comment_text: String,
}

impl NewComment {
    pub fn new(
        post_id: i64,
        parent_id: Option<i64>,
        author_id: i64,
        comment_text: String,
    ) -> Result<Self, DomainError> {
        require_text("comment_text", &comment_text)?;
        Ok(Self {
            post_id,
            parent_id,
            author_id,
            comment_text,
        })
    }

    pub fn into_comment(self, id: i64) -> Comment {
        Comment {
            id,
            time: time::local_now(),
            post_id: self.post_id,
            parent_id: self.parent_id,
            author_id: self.author_id,
            comment_text: self.comment_text,
            is_blocked: false,
            is_deleted: false,
            deleted_at: None,
        }
    }
}
