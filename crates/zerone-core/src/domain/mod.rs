//! Domain entities - the core business objects.

mod comment;
mod filter;
mod ownership;
mod post;
mod tag;
pub mod time;
mod user;

pub use comment::{Comment, NewComment};
pub use filter::PostFilter;
pub use ownership::{Owned, ensure_owner};
pub use post::{NewPost, Post, PostContent};
pub use tag::{NewTag, Tag};
pub use user::{NewUser, User};

use crate::error::DomainError;

/// Reject blank required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
