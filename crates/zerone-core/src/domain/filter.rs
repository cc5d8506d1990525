//! Post filters. Semantics follow SQL: an unset field imposes no constraint,
//! every set field must match.

use chrono::NaiveDateTime;

use super::post::Post;

/// Conjunction of optional predicates over posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Substring of the post text (case-sensitive).
    pub text: Option<String>,
    /// Exact last name of the author.
    pub author: Option<String>,
    pub author_id: Option<i64>,
    /// Exact text of a tag linked to the post.
    pub tag: Option<String>,
    /// Inclusive bounds on `update_time`.
    pub updated_from: Option<NaiveDateTime>,
    pub updated_to: Option<NaiveDateTime>,
    /// Inclusive upper bound on the publication `time`.
    pub published_before: Option<NaiveDateTime>,
    pub hide_deleted: bool,
    pub hide_blocked: bool,
    /// Order by publication time descending instead of insertion order.
    pub newest_first: bool,
}

impl PostFilter {
    /// Search filter; empty strings count as absent.
    pub fn search(
        text: Option<String>,
        author: Option<String>,
        tag: Option<String>,
        updated_from: Option<NaiveDateTime>,
        updated_to: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            text: present(text),
            author: present(author),
            tag: present(tag),
            updated_from,
            updated_to,
            ..Self::default()
        }
    }

    /// Posts on an author's wall.
    pub fn wall(author_id: i64) -> Self {
        Self {
            author_id: Some(author_id),
            hide_deleted: true,
            newest_first: true,
            ..Self::default()
        }
    }

    /// Visible posts already published at `now`.
    pub fn feed(now: NaiveDateTime) -> Self {
        Self {
            published_before: Some(now),
            hide_deleted: true,
            hide_blocked: true,
            newest_first: true,
            ..Self::default()
        }
    }

    /// Evaluate the filter in memory.
    ///
    /// `author_last_name` is the last name of the post's author, `tags` the
    /// texts of the tags linked to the post.
    pub fn matches(&self, post: &Post, author_last_name: Option<&str>, tags: &[&str]) -> bool {
        if let Some(text) = &self.text {
            if !post.post_text.contains(text.as_str()) {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if author_last_name != Some(author.as_str()) {
                return false;
            }
        }
        if let Some(author_id) = self.author_id {
            if post.author_id != author_id {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !tags.contains(&tag.as_str()) {
                return false;
            }
        }
        if self.updated_from.is_some_and(|from| post.update_time < from) {
            return false;
        }
        if self.updated_to.is_some_and(|to| post.update_time > to) {
            return false;
        }
        if self.published_before.is_some_and(|now| post.time > now) {
            return false;
        }
        if self.hide_deleted && post.is_deleted {
            return false;
        }
        !(self.hide_blocked && post.is_blocked)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
