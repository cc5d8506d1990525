//! Post queries and mutations.

use std::sync::Arc;

use crate::domain::{NewPost, Owned, Post, PostContent, PostFilter, ensure_owner, time};
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::ports::{CurrentActor, Notifier, PostRepository};

/// Title, body and tags of a post as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub post_text: String,
    pub tags: Vec<String>,
}

/// Raw search parameters; dates are epoch milliseconds.
#[derive(Debug, Clone, Default)]
pub struct PostSearch {
    pub text: Option<String>,
    pub author: Option<String>,
    pub tag: Option<String>,
    pub date_from: Option<i64>,
    pub date_to: Option<i64>,
}

impl PostSearch {
    fn into_filter(self) -> Result<PostFilter, DomainError> {
        let updated_from = self.date_from.map(time::from_epoch_millis).transpose()?;
        let updated_to = self.date_to.map(time::from_epoch_millis).transpose()?;
        Ok(PostFilter::search(
            self.text,
            self.author,
            self.tag,
            updated_from,
            updated_to,
        ))
    }
}

/// Post service.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    notifier: Arc<dyn Notifier>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { posts, notifier }
    }

    /// Publish a post on `author_id`'s wall. Only the author may do so.
    ///
    /// A `publish_date` of zero publishes now; otherwise it is epoch
    /// milliseconds in the system's local zone. Unknown tags are created
    /// together with the post, so a failed insert stores neither.
    pub async fn create_post(
        &self,
        actor: &dyn CurrentActor,
        author_id: i64,
        publish_date: i64,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        ensure_owner(author_id, actor.actor_id())?;

        let content = PostContent::new(draft.title, draft.post_text)?;
        let time = time::publish_time(publish_date)?;

        let post = self
            .posts
            .insert(NewPost::new(author_id, time, content).with_tags(draft.tags))
            .await?;
        tracing::info!(post_id = post.id, author_id, "Post created");

        if let Err(e) = self.notifier.notify_new_post(&post).await {
            tracing::warn!(post_id = post.id, error = %e, "New post notification dropped");
        }

        Ok(post)
    }

    pub async fn get_post_by_id(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    /// Posts matching every given search parameter, in insertion order.
    pub async fn search_posts(
        &self,
        search: PostSearch,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        let filter = search.into_filter()?;
        tracing::debug!(?filter, page = page.index(), size = page.size(), "Searching posts");
        Ok(self.posts.find_page(&filter, page).await?)
    }

    /// An author's non-deleted posts, newest first.
    pub async fn get_author_wall(
        &self,
        author_id: i64,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        Ok(self
            .posts
            .find_page(&PostFilter::wall(author_id), page)
            .await?)
    }

    /// Published, visible posts, newest first.
    pub async fn get_feeds(
        &self,
        actor: &dyn CurrentActor,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        tracing::debug!(actor_id = actor.actor_id(), page = page.index(), "Loading feed");
        Ok(self
            .posts
            .find_page(&PostFilter::feed(time::local_now()), page)
            .await?)
    }

    /// Soft-delete a post owned by the actor.
    pub async fn delete_post_by_id(
        &self,
        actor: &dyn CurrentActor,
        id: i64,
    ) -> Result<Post, DomainError> {
        let actor_id = actor.actor_id();
        let post = self
            .posts
            .modify(
                id,
                Box::new(move |post: &mut Post| -> Result<(), DomainError> {
                    ensure_owner(post.owner_id(), actor_id)?;
                    post.mark_deleted();
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(post_id = id, actor_id, "Post deleted");
        Ok(post)
    }

    /// Undo a soft delete.
    pub async fn recover_post_by_id(
        &self,
        actor: &dyn CurrentActor,
        id: i64,
    ) -> Result<Post, DomainError> {
        let actor_id = actor.actor_id();
        let post = self
            .posts
            .modify(
                id,
                Box::new(move |post: &mut Post| -> Result<(), DomainError> {
                    ensure_owner(post.owner_id(), actor_id)?;
                    post.recover();
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(post_id = id, actor_id, "Post recovered");
        Ok(post)
    }

    /// Overwrite title, text and publication time. Tags are left as they are.
    pub async fn edit_post_by_id(
        &self,
        actor: &dyn CurrentActor,
        id: i64,
        publish_date: i64,
        title: String,
        post_text: String,
    ) -> Result<Post, DomainError> {
        let actor_id = actor.actor_id();
        let post = self
            .posts
            .modify(
                id,
                Box::new(move |post: &mut Post| -> Result<(), DomainError> {
                    ensure_owner(post.owner_id(), actor_id)?;
                    let content = PostContent::new(title, post_text)?;
                    post.edit(content, time::publish_time(publish_date)?);
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(post_id = id, actor_id, "Post edited");
        Ok(post)
    }
}
