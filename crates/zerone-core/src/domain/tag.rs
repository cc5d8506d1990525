use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::DomainError;

/// Tag entity. The text is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub tag: String,
}

/// A tag that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub tag: String,
}

impl NewTag {
    pub fn new(tag: impl Into<String>) -> Result<Self, DomainError> {
        let tag = tag.into();
        require_text("tag", &tag)?;
        Ok(Self { tag })
    }
}
