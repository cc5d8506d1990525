use async_trait::async_trait;

use crate::domain::{Comment, NewComment, NewPost, NewTag, NewUser, Post, PostFilter, Tag, User};
use crate::error::{DomainError, RepoError};
use crate::pagination::{Page, PageRequest};

/// In-place change applied to a stored post inside one transaction.
/// Returning an error aborts the transaction.
pub type PostMutation = Box<dyn FnOnce(&mut Post) -> Result<(), DomainError> + Send>;

/// In-place change applied to a stored comment inside one transaction.
pub type CommentMutation = Box<dyn FnOnce(&mut Comment) -> Result<(), DomainError> + Send>;

/// Generic repository trait for lookup and update by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist changes to an existing entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Store a new post together with its tag links.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// One page of the posts matching every predicate of `filter`.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError>;

    /// Atomically fetch, mutate and persist a post.
    ///
    /// Fails with [`DomainError::NotFound`] when no post has this id.
    async fn modify(&self, id: i64, mutation: PostMutation) -> Result<Post, DomainError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i64> {
    async fn insert(&self, tag: NewTag) -> Result<Tag, RepoError>;

    /// Find a tag by its exact text.
    async fn find_by_tag(&self, tag: &str) -> Result<Option<Tag>, RepoError>;

    /// Tags whose text contains `filter`, or all tags when it is `None`.
    async fn find_page(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Tag>, RepoError>;

    /// Delete a tag and its post links. `RepoError::NotFound` if absent.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i64> {
    /// Store a new comment. The post and the parent, if any, must exist.
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// One page of a post's non-deleted comments, oldest first.
    async fn find_page(
        &self,
        post_id: i64,
        page: PageRequest,
    ) -> Result<Page<Comment>, RepoError>;

    /// Atomically fetch, mutate and persist a comment.
    ///
    /// Fails with [`DomainError::NotFound`] when no comment has this id.
    async fn modify(&self, id: i64, mutation: CommentMutation) -> Result<Comment, DomainError>;
}
