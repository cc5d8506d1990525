use std::collections::BTreeMap;
use std::num::NonZeroU64;

use chrono::NaiveDate;
use sea_orm::{
    DatabaseBackend, EntityTrait, MockDatabase, MockExecResult, QueryFilter, QueryTrait, Value,
};

use zerone_core::domain::{Comment, NewPost, Post, PostContent, PostFilter, ensure_owner};
use zerone_core::error::DomainError;
use zerone_core::pagination::PageRequest;
use zerone_core::ports::{BaseRepository, CommentRepository, PostRepository};

use super::entity::{comment, post, tag};
use super::postgres_repo::{PostgresCommentRepository, PostgresPostRepository};
use super::query::{contains_pattern, post_condition};

fn model(id: i64, author_id: i64) -> post::Model {
    let time = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    post::Model {
        id,
        time,
        author_id,
        title: "Test Post".to_owned(),
        post_text: "Content".to_owned(),
        update_time: time,
        is_blocked: false,
        is_deleted: false,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(3, 1)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(3).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 3);
    assert_eq!(post.author_id, 1);
}

#[tokio::test]
async fn test_find_page_reports_total() {
    let count = BTreeMap::from([("num_items", Value::BigInt(Some(12)))]);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count]])
        .append_query_results([vec![model(6, 1), model(7, 2)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let page = PageRequest::from_offset(5, NonZeroU64::new(5).unwrap());

    let result = repo.find_page(&PostFilter::default(), page).await.unwrap();

    assert_eq!(result.total, 12);
    assert_eq!(
        result.items.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![6, 7]
    );
}

#[tokio::test]
async fn test_insert_post_with_tags() {
    let tags = vec![
        tag::Model {
            id: 1,
            tag: "rust".to_owned(),
        },
        tag::Model {
            id: 2,
            tag: "web".to_owned(),
        },
    ];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(9, 4)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([tags])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db.clone());
    let content = PostContent::new("Test Post".to_owned(), "Content".to_owned()).unwrap();
    let new_post = NewPost::new(4, model(9, 4).time, content)
        .with_tags(vec!["web".to_owned(), "rust".to_owned()]);

    let post = repo.insert(new_post).await.unwrap();

    assert_eq!(post.id, 9);
    assert_eq!(post.author_id, 4);

    // Post, tags and links go through one transaction.
    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("ON CONFLICT"), "{sql}");
    assert!(sql.contains("post2tag"), "{sql}");
}

#[tokio::test]
async fn test_modify_applies_mutation() {
    let mut deleted = model(5, 1);
    deleted.is_deleted = true;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(5, 1)]])
        .append_query_results([vec![deleted]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo
        .modify(
            5,
            Box::new(|post: &mut Post| -> Result<(), DomainError> {
                ensure_owner(post.author_id, 1)?;
                post.mark_deleted();
                Ok(())
            }),
        )
        .await
        .unwrap();

    assert!(post.is_deleted);
}

#[tokio::test]
async fn test_modify_stops_on_mutation_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(5, 1)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo
        .modify(
            5,
            Box::new(|post: &mut Post| -> Result<(), DomainError> {
                ensure_owner(post.author_id, 2)?;
                post.mark_deleted();
                Ok(())
            }),
        )
        .await;

    assert!(matches!(result, Err(DomainError::Forbidden(_))));
}

#[tokio::test]
async fn test_modify_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo
        .modify(42, Box::new(|_: &mut Post| -> Result<(), DomainError> { Ok(()) }))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            entity_type: "Post",
            id: 42
        })
    ));
}

fn comment_model(id: i64, post_id: i64) -> comment::Model {
    comment::Model {
        id,
        time: model(post_id, 1).time,
        post_id,
        parent_id: None,
        author_id: 1,
        comment_text: "Nice".to_owned(),
        is_blocked: false,
        is_deleted: false,
        deleted_at: None,
    }
}

#[tokio::test]
async fn test_comment_page_reports_total() {
    let count = BTreeMap::from([("num_items", Value::BigInt(Some(3)))]);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count]])
        .append_query_results([vec![comment_model(1, 5), comment_model(2, 5)]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let page = PageRequest::new(0, NonZeroU64::new(2).unwrap());

    let result = repo.find_page(5, page).await.unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(result.items[1].id, 2);
}

#[tokio::test]
async fn test_comment_modify_stamps_deletion() {
    let mut deleted = comment_model(4, 5);
    deleted.is_deleted = true;
    deleted.deleted_at = Some(deleted.time);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![comment_model(4, 5)]])
        .append_query_results([vec![deleted]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    let comment = repo
        .modify(
            4,
            Box::new(|comment: &mut Comment| -> Result<(), DomainError> {
                ensure_owner(comment.author_id, 1)?;
                comment.mark_deleted();
                Ok(())
            }),
        )
        .await
        .unwrap();

    assert!(comment.is_deleted);
    assert!(comment.deleted_at.is_some());
}

#[test]
fn test_empty_filter_has_no_where_clause() {
    let sql = post::Entity::find()
        .filter(post_condition(&PostFilter::default()))
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(!sql.contains("WHERE"), "{sql}");
}

#[test]
fn test_search_filter_combines_predicates() {
    let from = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let filter = PostFilter::search(
        Some("abc".to_string()),
        Some("Smith".to_string()),
        Some("rust".to_string()),
        Some(from),
        None,
    );

    let sql = post::Entity::find()
        .filter(post_condition(&filter))
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains("LIKE"), "{sql}");
    assert!(sql.contains("%abc%"), "{sql}");
    assert!(sql.contains("'Smith'"), "{sql}");
    assert!(sql.contains("\"post2tag\""), "{sql}");
    assert!(sql.contains("'rust'"), "{sql}");
    assert!(sql.contains("\"update_time\" >="), "{sql}");
    assert_eq!(sql.matches(" AND ").count(), 3, "{sql}");
}

#[test]
fn test_contains_pattern_escapes_wildcards() {
    assert_eq!(contains_pattern("abc"), "%abc%");
    assert_eq!(contains_pattern("a_c"), r"%a\_c%");
    assert_eq!(contains_pattern("50%"), r"%50\%%");
    assert_eq!(contains_pattern(r"c:\tmp"), r"%c:\\tmp%");
}

#[test]
fn test_text_filter_matches_wildcards_literally() {
    let filter = PostFilter::search(Some("a_c".to_string()), None, None, None, None);

    let sql = post::Entity::find()
        .filter(post_condition(&filter))
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains("ESCAPE"), "{sql}");
    assert!(!sql.contains("'%a_c%'"), "{sql}");
}
