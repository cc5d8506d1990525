use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use zerone_core::domain::{NewTag, Tag};
use zerone_core::error::RepoError;
use zerone_core::pagination::{Page, PageRequest};
use zerone_core::ports::{BaseRepository, TagRepository};

use super::{Tables, next_id};

/// In-memory tag repository.
pub struct InMemoryTagRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryTagRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

fn text_taken(tables: &Tables, text: &str, except: Option<i64>) -> bool {
    tables
        .tags
        .values()
        .any(|t| t.tag == text && Some(t.id) != except)
}

#[async_trait]
impl BaseRepository<Tag, i64> for InMemoryTagRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn save(&self, tag: Tag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.tags.contains_key(&tag.id) {
            return Err(RepoError::NotFound);
        }
        if text_taken(&tables, &tag.tag, Some(tag.id)) {
            return Err(RepoError::Constraint("tag_tag_key".to_string()));
        }
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn insert(&self, new_tag: NewTag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if text_taken(&tables, &new_tag.tag, None) {
            return Err(RepoError::Constraint("tag_tag_key".to_string()));
        }

        let tag = Tag {
            id: next_id(&mut tables.tag_seq),
            tag: new_tag.tag,
        };
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn find_by_tag(&self, text: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|t| t.tag == text).cloned())
    }

    async fn find_page(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Tag>, RepoError> {
        let tables = self.tables.read().await;
        let matching = tables
            .tags
            .values()
            .filter(|t| filter.is_none_or(|text| t.tag.contains(text)))
            .cloned();

        Ok(page.window(matching))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.tags.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.post_tags.retain(|&(_, tag_id)| tag_id != id);
        Ok(())
    }
}
