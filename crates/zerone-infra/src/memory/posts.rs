use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use zerone_core::domain::{NewPost, Post, PostFilter};
use zerone_core::error::{DomainError, RepoError};
use zerone_core::pagination::{Page, PageRequest};
use zerone_core::ports::{BaseRepository, PostMutation, PostRepository};

use super::{Tables, next_id};

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        match tables.posts.get_mut(&post.id) {
            Some(stored) => {
                *stored = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, mut new_post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        // Every check runs before the first write.
        if !tables.users.contains_key(&new_post.author_id) {
            return Err(RepoError::Constraint("post_author_id_fkey".to_string()));
        }

        let tag_names = std::mem::take(&mut new_post.tag_names);
        let id = next_id(&mut tables.post_seq);
        for name in &tag_names {
            let tag_id = tables.tag_id_or_insert(name);
            tables.post_tags.insert((id, tag_id));
        }
        let post = new_post.into_post(id);
        tables.posts.insert(id, post.clone());

        Ok(post)
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let tables = self.tables.read().await;

        let mut matching: Vec<&Post> = tables
            .posts
            .values()
            .filter(|post| {
                let last_name = tables
                    .users
                    .get(&post.author_id)
                    .map(|u| u.last_name.as_str());
                filter.matches(post, last_name, &tables.tags_of(post.id))
            })
            .collect();

        if filter.newest_first {
            matching.sort_by(|a, b| b.time.cmp(&a.time).then(b.id.cmp(&a.id)));
        }

        Ok(page.window(matching.into_iter().cloned()))
    }

    async fn modify(&self, id: i64, mutation: PostMutation) -> Result<Post, DomainError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        // Work on a copy so a failed mutation leaves the stored post untouched.
        let mut post = stored.clone();
        mutation(&mut post)?;
        *stored = post.clone();

        Ok(post)
    }
}
