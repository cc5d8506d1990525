//! Post comment entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use zerone_core::domain::{Comment, NewComment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post_comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub time: DateTime,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub author_id: i64,
    #[sea_orm(column_type = "Text")]
    pub comment_text: String,
    pub is_blocked: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Parent,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            time: model.time,
            post_id: model.post_id,
            parent_id: model.parent_id,
            author_id: model.author_id,
            comment_text: model.comment_text,
            is_blocked: model.is_blocked,
            is_deleted: model.is_deleted,
            deleted_at: model.deleted_at,
        }
    }
}

impl From<Comment> for ActiveModel {
    fn from(comment: Comment) -> Self {
        Self {
            id: Set(comment.id),
            time: Set(comment.time),
            post_id: Set(comment.post_id),
            parent_id: Set(comment.parent_id),
            author_id: Set(comment.author_id),
            comment_text: Set(comment.comment_text),
            is_blocked: Set(comment.is_blocked),
            is_deleted: Set(comment.is_deleted),
            deleted_at: Set(comment.deleted_at),
        }
    }
}

/// Insert form: the id is left to the database sequence.
impl From<NewComment> for ActiveModel {
    fn from(comment: NewComment) -> Self {
        let mut model: Self = comment.into_comment(0).into();
        model.id = NotSet;
        model
    }
}
