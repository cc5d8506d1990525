//! Query builders for post filters.

use sea_orm::sea_query::{Expr, IntoColumnRef, LikeExpr, Query, SelectStatement, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

use zerone_core::domain::PostFilter;

use super::entity::{post, post_tag, tag, user};

/// The conjunction of every predicate set on `filter`.
pub(crate) fn post_condition(filter: &PostFilter) -> Condition {
    Condition::all()
        .add_option(
            filter
                .text
                .as_deref()
                .map(|text| contains_text((post::Entity, post::Column::PostText), text)),
        )
        .add_option(
            filter
                .author
                .as_deref()
                .map(|name| post::Column::AuthorId.in_subquery(authors_named(name))),
        )
        .add_option(filter.author_id.map(|id| post::Column::AuthorId.eq(id)))
        .add_option(
            filter
                .tag
                .as_deref()
                .map(|tag| post::Column::Id.in_subquery(posts_tagged(tag))),
        )
        .add_option(
            filter
                .updated_from
                .map(|from| post::Column::UpdateTime.gte(from)),
        )
        .add_option(filter.updated_to.map(|to| post::Column::UpdateTime.lte(to)))
        .add_option(
            filter
                .published_before
                .map(|now| post::Column::Time.lte(now)),
        )
        .add_option(
            filter
                .hide_deleted
                .then(|| post::Column::IsDeleted.eq(false)),
        )
        .add_option(
            filter
                .hide_blocked
                .then(|| post::Column::IsBlocked.eq(false)),
        )
}

/// `SELECT id FROM users WHERE last_name = ?`
fn authors_named(last_name: &str) -> SelectStatement {
    Query::select()
        .column(user::Column::Id)
        .from(user::Entity)
        .and_where(user::Column::LastName.eq(last_name))
        .to_owned()
}

/// Ids of the posts linked to the tag with this exact text.
fn posts_tagged(tag_text: &str) -> SelectStatement {
    Query::select()
        .column((post_tag::Entity, post_tag::Column::PostId))
        .from(post_tag::Entity)
        .inner_join(
            tag::Entity,
            Expr::col((tag::Entity, tag::Column::Id))
                .equals((post_tag::Entity, post_tag::Column::TagId)),
        )
        .and_where(Expr::col((tag::Entity, tag::Column::Tag)).eq(tag_text))
        .to_owned()
}

/// `column LIKE '%text%' ESCAPE '\'`, with `text` matched literally.
pub(crate) fn contains_text<C: IntoColumnRef>(column: C, text: &str) -> SimpleExpr {
    Expr::col(column).like(LikeExpr::new(contains_pattern(text)).escape('\\'))
}

/// Wrap `text` in `%` after escaping the `LIKE` metacharacters it holds.
pub(crate) fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
