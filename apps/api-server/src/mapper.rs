//! Domain values to API shapes.

use std::num::NonZeroU64;

use zerone_core::domain::{Comment, Post, Tag, User, time};
use zerone_core::pagination::{Page, PageRequest};
use zerone_shared::CommonListResponse;
use zerone_shared::dto::{CommentResponse, PostResponse, TagResponse, UserResponse};
use zerone_shared::query::PaginationQuery;

use crate::middleware::error::{AppError, AppResult};

/// Validated `offset` + `itemPerPage`.
#[derive(Debug, Clone, Copy)]
pub struct Paging {
    pub offset: u64,
    pub per_page: NonZeroU64,
}

impl Paging {
    pub fn from_query(query: &PaginationQuery) -> AppResult<Self> {
        let offset = u64::try_from(query.offset)
            .map_err(|_| AppError::BadRequest("offset must not be negative".to_string()))?;
        let per_page = u64::try_from(query.item_per_page)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or_else(|| AppError::BadRequest("itemPerPage must be positive".to_string()))?;

        Ok(Self { offset, per_page })
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::from_offset(self.offset, self.per_page)
    }

    /// Wrap a page in the list envelope, echoing the client's offset and size.
    pub fn envelope<T, U>(&self, page: Page<T>, f: impl FnMut(T) -> U) -> CommonListResponse<U> {
        let page = page.map(f);
        CommonListResponse::new(self.offset, self.per_page.get(), page.total, page.items)
    }
}

pub fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        time: time::to_epoch_millis(post.time),
        update_time: time::to_epoch_millis(post.update_time),
        author_id: post.author_id,
        title: post.title,
        post_text: post.post_text,
        is_blocked: post.is_blocked,
        is_deleted: post.is_deleted,
    }
}

pub fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        time: time::to_epoch_millis(comment.time),
        post_id: comment.post_id,
        parent_id: comment.parent_id,
        author_id: comment.author_id,
        comment_text: comment.comment_text,
        is_blocked: comment.is_blocked,
        is_deleted: comment.is_deleted,
    }
}

pub fn tag_response(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id,
        tag: tag.tag,
    }
}

pub fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        reg_date: user.created_at.timestamp_millis(),
        is_deleted: user.is_deleted,
    }
}
