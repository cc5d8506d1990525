//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use zerone_core::domain::Post;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub time: DateTime,
    pub author_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub post_text: String,
    pub update_time: DateTime,
    pub is_blocked: bool,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            time: model.time,
            update_time: model.update_time,
            author_id: model.author_id,
            title: model.title,
            post_text: model.post_text,
            is_blocked: model.is_blocked,
            is_deleted: model.is_deleted,
        }
    }
}

impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            time: Set(post.time),
            author_id: Set(post.author_id),
            title: Set(post.title),
            post_text: Set(post.post_text),
            update_time: Set(post.update_time),
            is_blocked: Set(post.is_blocked),
            is_deleted: Set(post.is_deleted),
        }
    }
}
