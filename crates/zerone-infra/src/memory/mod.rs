//! In-memory store - used when no database is configured, and by tests.
//!
//! All repositories handed out by one [`MemoryStore`] share the same tables,
//! so foreign keys (post author, post tags, comment post) resolve across them.
//! Data is lost on process restart.

mod comments;
mod posts;
mod tags;
mod users;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use zerone_core::domain::{Comment, Post, Tag, User};

pub use comments::InMemoryCommentRepository;
pub use posts::InMemoryPostRepository;
pub use tags::InMemoryTagRepository;
pub use users::InMemoryUserRepository;

#[derive(Default)]
pub(crate) struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    tags: BTreeMap<i64, Tag>,
    /// (post id, tag id) pairs.
    post_tags: BTreeSet<(i64, i64)>,
    comments: BTreeMap<i64, Comment>,
    user_seq: i64,
    post_seq: i64,
    tag_seq: i64,
    comment_seq: i64,
}

impl Tables {
    /// Texts of the tags linked to a post.
    fn tags_of(&self, post_id: i64) -> Vec<&str> {
        self.post_tags
            .range((post_id, i64::MIN)..=(post_id, i64::MAX))
            .filter_map(|(_, tag_id)| self.tags.get(tag_id))
            .map(|tag| tag.tag.as_str())
            .collect()
    }

    /// Id of the tag with this text, creating it when missing.
    fn tag_id_or_insert(&mut self, text: &str) -> i64 {
        if let Some(tag) = self.tags.values().find(|t| t.tag == text) {
            return tag.id;
        }
        let id = next_id(&mut self.tag_seq);
        self.tags.insert(
            id,
            Tag {
                id,
                tag: text.to_string(),
            },
        );
        id
    }
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

/// Shared in-memory tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository::new(self.tables.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository::new(self.tables.clone())
    }

    pub fn tags(&self) -> InMemoryTagRepository {
        InMemoryTagRepository::new(self.tables.clone())
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository::new(self.tables.clone())
    }
}
