//! Tag queries and management.

use std::sync::Arc;

use crate::domain::{NewTag, Tag};
use crate::error::{DomainError, RepoError};
use crate::pagination::{Page, PageRequest};
use crate::ports::TagRepository;

/// Tag service.
#[derive(Clone)]
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    /// All tags when `filter` is empty, otherwise the tags containing it.
    pub async fn get_all_tags(
        &self,
        filter: &str,
        page: PageRequest,
    ) -> Result<Page<Tag>, DomainError> {
        let filter = (!filter.is_empty()).then_some(filter);
        Ok(self.tags.find_page(filter, page).await?)
    }

    pub async fn add_tag(&self, tag: String) -> Result<Tag, DomainError> {
        let new_tag = NewTag::new(tag)?;
        if self.tags.find_by_tag(&new_tag.tag).await?.is_some() {
            return Err(DomainError::Duplicate(format!("tag '{}'", new_tag.tag)));
        }

        let tag = self.tags.insert(new_tag).await.map_err(|e| match e {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => other.into(),
        })?;
        tracing::info!(tag_id = tag.id, tag = %tag.tag, "Tag created");
        Ok(tag)
    }

    pub async fn delete_tag(&self, id: i64) -> Result<(), DomainError> {
        self.tags.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Tag", id),
            other => other.into(),
        })?;
        tracing::info!(tag_id = id, "Tag deleted");
        Ok(())
    }
}
