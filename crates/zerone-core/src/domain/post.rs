use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ownership::Owned;
use super::{require_text, time};
use crate::error::DomainError;

/// Post entity - a publication on an author's wall.
///
/// Posts are never removed from the store; deletion only flips `is_deleted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    /// Publication time, local calendar time.
    pub time: NaiveDateTime,
    pub update_time: NaiveDateTime,
    pub author_id: i64,
    pub title: String,
    pub post_text: String,
    pub is_blocked: bool,
    pub is_deleted: bool,
}

impl Post {
    /// Overwrite title, text and publication time.
    pub fn edit(&mut self, content: PostContent, time: NaiveDateTime) {
        self.title = content.title;
        self.post_text = content.post_text;
        self.time = time;
        self.update_time = time::local_now();
    }

    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }

    pub fn recover(&mut self) {
        self.is_deleted = false;
    }
}

impl Owned for Post {
    fn owner_id(&self) -> i64 {
        self.author_id
    }
}

/// Validated title and body of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    pub title: String,
    pub post_text: String,
}

impl PostContent {
    pub fn new(title: String, post_text: String) -> Result<Self, DomainError> {
        require_text("title", &title)?;
        require_text("post_text", &post_text)?;
        Ok(Self { title, post_text })
    }
}

/// A post that has not been stored yet, with the tags to link to it.
///
/// Tags are carried by text; the store looks them up, creates the missing
/// ones and links them in the same write as the post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub time: NaiveDateTime,
    pub content: PostContent,
    pub tag_names: Vec<String>,
}

impl NewPost {
    pub fn new(author_id: i64, time: NaiveDateTime, content: PostContent) -> Self {
        Self {
            author_id,
            time,
            content,
            tag_names: Vec::new(),
        }
    }

    /// Attach tag texts, dropping blanks and duplicates.
    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let names: BTreeSet<String> = tags
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect();
        self.tag_names = names.into_iter().collect();
        self
    }

    /// Build the stored form once the store has picked an id.
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            time: self.time,
            update_time: time::local_now(),
            author_id: self.author_id,
            title: self.content.title,
            post_text: self.content.post_text,
            is_blocked: false,
            is_deleted: false,
        }
    }
}
