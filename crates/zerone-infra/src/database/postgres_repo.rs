//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use zerone_core::domain::{
    Comment, NewComment, NewPost, NewTag, NewUser, Post, PostFilter, Tag, User,
};
use zerone_core::error::{DomainError, RepoError};
use zerone_core::pagination::{Page, PageRequest};
use zerone_core::ports::{
    CommentMutation, CommentRepository, PostMutation, PostRepository, TagRepository,
    UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, db_error};
use super::query::{contains_text, post_condition};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = new_user.into();
        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) if local.chars().nth(1).is_some() => format!("{first}***@{domain}"),
                _ => format!("***@{domain}"),
            },
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, mut new_post: NewPost) -> Result<Post, RepoError> {
        let tag_names = std::mem::take(&mut new_post.tag_names);
        let mut active_model: post::ActiveModel = new_post.into_post(0).into();
        active_model.id = NotSet;

        // Dropping `txn` on error rolls back the post, its new tags and links.
        let txn = self.db.begin().await.map_err(db_error)?;
        let model = active_model.insert(&txn).await.map_err(db_error)?;

        if !tag_names.is_empty() {
            let new_tags = tag_names.iter().map(|name| {
                tag::ActiveModel::from(NewTag {
                    tag: name.clone(),
                })
            });
            TagEntity::insert_many(new_tags)
                .on_conflict(OnConflict::column(tag::Column::Tag).do_nothing().to_owned())
                .exec_without_returning(&txn)
                .await
                .map_err(db_error)?;

            let tags = TagEntity::find()
                .filter(tag::Column::Tag.is_in(tag_names))
                .all(&txn)
                .await
                .map_err(db_error)?;

            let links = tags.into_iter().map(|tag| post_tag::ActiveModel {
                post_id: Set(model.id),
                tag_id: Set(tag.id),
            });
            PostTagEntity::insert_many(links)
                .exec_without_returning(&txn)
                .await
                .map_err(db_error)?;
        }

        txn.commit().await.map_err(db_error)?;
        Ok(model.into())
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let query = PostEntity::find().filter(post_condition(filter));
        let query = if filter.newest_first {
            query
                .order_by_desc(post::Column::Time)
                .order_by_desc(post::Column::Id)
        } else {
            query.order_by_asc(post::Column::Id)
        };

        let paginator = query.paginate(&self.db, page.size());
        let total = paginator.num_items().await.map_err(db_error)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_error)?;

        Ok(Page::new(models.into_iter().map(Into::into).collect(), total))
    }

    async fn modify(&self, id: i64, mutation: PostMutation) -> Result<Post, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let model = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        let mut post: Post = model.into();
        // Dropping `txn` on error rolls back.
        mutation(&mut post)?;

        let active_model: post::ActiveModel = post.into();
        let updated = active_model.update(&txn).await.map_err(db_error)?;
        txn.commit().await.map_err(db_error)?;

        Ok(updated.into())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn insert(&self, new_tag: NewTag) -> Result<Tag, RepoError> {
        let active_model: tag::ActiveModel = new_tag.into();
        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        Ok(model.into())
    }

    async fn find_by_tag(&self, text: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Tag.eq(text))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_page(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Tag>, RepoError> {
        let mut query = TagEntity::find();
        if let Some(text) = filter {
            query = query.filter(contains_text((tag::Entity, tag::Column::Tag), text));
        }

        let paginator = query
            .order_by_asc(tag::Column::Id)
            .paginate(&self.db, page.size());
        let total = paginator.num_items().await.map_err(db_error)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_error)?;

        Ok(Page::new(models.into_iter().map(Into::into).collect(), total))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        // post2tag rows go with the tag through ON DELETE CASCADE.
        let result = TagEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let active_model: comment::ActiveModel = new_comment.into();
        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        Ok(model.into())
    }

    async fn find_page(
        &self,
        post_id: i64,
        page: PageRequest,
    ) -> Result<Page<Comment>, RepoError> {
        let paginator = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::IsDeleted.eq(false))
            .order_by_asc(comment::Column::Id)
            .paginate(&self.db, page.size());
        let total = paginator.num_items().await.map_err(db_error)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_error)?;

        Ok(Page::new(models.into_iter().map(Into::into).collect(), total))
    }

    async fn modify(&self, id: i64, mutation: CommentMutation) -> Result<Comment, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let model = CommentEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Comment", id))?;

        let mut comment: Comment = model.into();
        mutation(&mut comment)?;

        let active_model: comment::ActiveModel = comment.into();
        let updated = active_model.update(&txn).await.map_err(db_error)?;
        txn.commit().await.map_err(db_error)?;

        Ok(updated.into())
    }
}
