//! Post service behaviour over the in-memory store.

use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Local, TimeZone};

use zerone_core::domain::{NewUser, Post};
use zerone_core::error::DomainError;
use zerone_core::pagination::{Page, PageRequest};
use zerone_core::ports::{
    ActorId, Notifier, NotifyError, PostRepository, TagRepository, UserRepository,
};
use zerone_core::services::{PostDraft, PostSearch, PostService};
use zerone_infra::{MemoryStore, NotificationQueue, NotificationQueueConfig};

#[derive(Default)]
struct CountingNotifier {
    calls: AtomicUsize,
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify_new_post(&self, _post: &Post) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct BrokenNotifier;

#[async_trait]
impl Notifier for BrokenNotifier {
    async fn notify_new_post(&self, _post: &Post) -> Result<(), NotifyError> {
        Err(NotifyError::Closed)
    }
}

struct Fixture {
    store: MemoryStore,
    service: PostService,
}

fn fixture(notifier: Arc<dyn Notifier>) -> Fixture {
    let store = MemoryStore::new();
    let service = PostService::new(Arc::new(store.posts()), notifier);
    Fixture { store, service }
}

async fn add_user(store: &MemoryStore, email: &str, last_name: &str) -> i64 {
    store
        .users()
        .insert(
            NewUser::new(
                email.to_string(),
                "hash".to_string(),
                "First".to_string(),
                last_name.to_string(),
            )
            .unwrap(),
        )
        .await
        .unwrap()
        .id
}

fn draft(title: &str, text: &str, tags: &[&str]) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        post_text: text.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn page(offset: u64, size: u64) -> PageRequest {
    PageRequest::from_offset(offset, NonZeroU64::new(size).unwrap())
}

fn millis(y: i32, m: u32, d: u32) -> i64 {
    Local
        .with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .unwrap()
        .timestamp_millis()
}

#[tokio::test]
async fn create_by_other_actor_is_forbidden_and_persists_nothing() {
    let notifier = Arc::new(CountingNotifier::default());
    let f = fixture(notifier.clone());
    let author = add_user(&f.store, "a@example.com", "Smith").await;
    let intruder = add_user(&f.store, "b@example.com", "Jones").await;

    let result = f
        .service
        .create_post(&ActorId(intruder), author, 0, draft("t", "body", &["rust"]))
        .await;

    assert!(matches!(result, Err(DomainError::Forbidden(_))));
    let all = f.service.search_posts(PostSearch::default(), page(0, 20)).await.unwrap();
    assert_eq!(all.total, 0);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    assert!(f.store.tags().find_by_tag("rust").await.unwrap().is_none());
}

#[tokio::test]
async fn create_notifies_and_resolves_tags() {
    let notifier = Arc::new(CountingNotifier::default());
    let f = fixture(notifier.clone());
    let author = add_user(&f.store, "a@example.com", "Smith").await;

    let first = f
        .service
        .create_post(&ActorId(author), author, 0, draft("t", "one", &["rust", "web"]))
        .await
        .unwrap();
    f.service
        .create_post(&ActorId(author), author, 0, draft("t", "two", &["rust", "rust"]))
        .await
        .unwrap();

    assert_eq!(notifier.calls.load(Ordering::SeqCst), 2);
    let tags = zerone_core::services::TagService::new(Arc::new(f.store.tags()));
    assert_eq!(tags.get_all_tags("", page(0, 20)).await.unwrap().total, 2);

    let search = PostSearch {
        tag: Some("web".to_string()),
        ..PostSearch::default()
    };
    let found = f.service.search_posts(search, page(0, 20)).await.unwrap();
    assert_eq!(found.items, vec![first]);
}

#[tokio::test]
async fn notifier_failure_does_not_fail_create() {
    let f = fixture(Arc::new(BrokenNotifier));
    let author = add_user(&f.store, "a@example.com", "Smith").await;

    let post = f
        .service
        .create_post(&ActorId(author), author, 0, draft("t", "body", &[]))
        .await
        .unwrap();

    assert_eq!(f.service.get_post_by_id(post.id).await.unwrap(), post);
}

#[tokio::test]
async fn full_notification_queue_does_not_fail_create() {
    let queue = Arc::new(NotificationQueue::new(NotificationQueueConfig {
        capacity: 1,
        ..NotificationQueueConfig::default()
    }));
    let f = fixture(queue.clone());
    let author = add_user(&f.store, "a@example.com", "Smith").await;

    for text in ["one", "two", "three"] {
        f.service
            .create_post(&ActorId(author), author, 0, draft("t", text, &[]))
            .await
            .unwrap();
    }

    assert_eq!(queue.stats().pending, 1);
    let all = f.service.search_posts(PostSearch::default(), page(0, 20)).await.unwrap();
    assert_eq!(all.total, 3);
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;

    let result = f
        .service
        .create_post(&ActorId(author), author, 0, draft("  ", "body", &[]))
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn explicit_publish_date_is_kept() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;
    let when = millis(2023, 7, 14);

    let post = f
        .service
        .create_post(&ActorId(author), author, when, draft("t", "body", &[]))
        .await
        .unwrap();

    let expected = Local.timestamp_millis_opt(when).unwrap().naive_local();
    assert_eq!(post.time, expected);
}

#[tokio::test]
async fn delete_then_recover_restores_post() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;
    let actor = ActorId(author);
    let original = f
        .service
        .create_post(&actor, author, 0, draft("t", "body", &[]))
        .await
        .unwrap();

    let deleted = f.service.delete_post_by_id(&actor, original.id).await.unwrap();
    assert!(deleted.is_deleted);
    let wall = f.service.get_author_wall(author, page(0, 20)).await.unwrap();
    assert_eq!(wall.total, 0);

    let recovered = f.service.recover_post_by_id(&actor, original.id).await.unwrap();
    assert_eq!(recovered, original);
}

#[tokio::test]
async fn delete_unknown_post_is_not_found() {
    let f = fixture(Arc::new(CountingNotifier::default()));

    let result = f.service.delete_post_by_id(&ActorId(1), 404).await;

    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            entity_type: "Post",
            id: 404
        })
    ));
}

#[tokio::test]
async fn non_author_cannot_edit_delete_or_recover() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;
    let other = ActorId(add_user(&f.store, "b@example.com", "Jones").await);
    let original = f
        .service
        .create_post(&ActorId(author), author, 0, draft("title", "body", &[]))
        .await
        .unwrap();

    let edit = f
        .service
        .edit_post_by_id(&other, original.id, 0, "hacked".to_string(), "hacked".to_string())
        .await;
    let delete = f.service.delete_post_by_id(&other, original.id).await;
    let recover = f.service.recover_post_by_id(&other, original.id).await;

    assert!(matches!(edit, Err(DomainError::Forbidden(_))));
    assert!(matches!(delete, Err(DomainError::Forbidden(_))));
    assert!(matches!(recover, Err(DomainError::Forbidden(_))));
    assert_eq!(f.service.get_post_by_id(original.id).await.unwrap(), original);
}

#[tokio::test]
async fn author_edit_overwrites_content() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;
    let actor = ActorId(author);
    let original = f
        .service
        .create_post(&actor, author, 0, draft("title", "body", &[]))
        .await
        .unwrap();

    let edited = f
        .service
        .edit_post_by_id(&actor, original.id, 0, "new title".to_string(), "new body".to_string())
        .await
        .unwrap();

    assert_eq!(edited.title, "new title");
    assert_eq!(edited.post_text, "new body");
    assert!(edited.update_time >= original.update_time);
    assert_eq!(f.service.get_post_by_id(original.id).await.unwrap(), edited);
}

#[tokio::test]
async fn search_requires_every_predicate() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let smith = add_user(&f.store, "a@example.com", "Smith").await;
    let jones = add_user(&f.store, "b@example.com", "Jones").await;

    let both = f
        .service
        .create_post(&ActorId(smith), smith, 0, draft("t", "xx abc xx", &[]))
        .await
        .unwrap();
    // Text only, author only.
    f.service
        .create_post(&ActorId(jones), jones, 0, draft("t", "xx abc xx", &[]))
        .await
        .unwrap();
    f.service
        .create_post(&ActorId(smith), smith, 0, draft("t", "nothing", &[]))
        .await
        .unwrap();

    let search = PostSearch {
        text: Some("abc".to_string()),
        author: Some("Smith".to_string()),
        date_from: Some(millis(2000, 1, 1)),
        ..PostSearch::default()
    };
    let found = f.service.search_posts(search, page(0, 20)).await.unwrap();
    assert_eq!(found.items, vec![both]);

    let future = PostSearch {
        text: Some("abc".to_string()),
        author: Some("Smith".to_string()),
        date_from: Some(millis(2999, 1, 1)),
        ..PostSearch::default()
    };
    assert_eq!(f.service.search_posts(future, page(0, 20)).await.unwrap().total, 0);
}

#[tokio::test]
async fn failed_create_leaves_no_new_tags() {
    let notifier = Arc::new(CountingNotifier::default());
    let f = fixture(notifier.clone());

    // No user 7 exists, so the store rejects the post itself.
    let result = f
        .service
        .create_post(&ActorId(7), 7, 0, draft("t", "body", &["orphan"]))
        .await;

    assert!(matches!(result, Err(DomainError::Repository(_))));
    assert!(f.store.tags().find_by_tag("orphan").await.unwrap().is_none());
    assert_eq!(f.store.tags().find_page(None, page(0, 20)).await.unwrap().total, 0);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn search_text_wildcards_match_literally() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;

    for text in ["abc", "50 percent", "x a_c x", "up 50% today"] {
        f.service
            .create_post(&ActorId(author), author, 0, draft("t", text, &[]))
            .await
            .unwrap();
    }

    let texts = |found: Page<Post>| -> Vec<String> {
        found.items.into_iter().map(|p| p.post_text).collect()
    };

    let underscore = PostSearch {
        text: Some("a_c".to_string()),
        ..PostSearch::default()
    };
    let found = f.service.search_posts(underscore, page(0, 20)).await.unwrap();
    assert_eq!(texts(found), vec!["x a_c x"]);

    let percent = PostSearch {
        text: Some("50%".to_string()),
        ..PostSearch::default()
    };
    let found = f.service.search_posts(percent, page(0, 20)).await.unwrap();
    assert_eq!(texts(found), vec!["up 50% today"]);
}

#[tokio::test]
async fn empty_search_strings_are_ignored() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;
    for text in ["a", "b", "c"] {
        f.service
            .create_post(&ActorId(author), author, 0, draft("t", text, &[]))
            .await
            .unwrap();
    }

    let blank = PostSearch {
        text: Some(String::new()),
        author: Some(String::new()),
        tag: Some(String::new()),
        ..PostSearch::default()
    };
    let filtered = f.service.search_posts(blank, page(0, 20)).await.unwrap();
    let all = f.service.search_posts(PostSearch::default(), page(0, 20)).await.unwrap();
    assert_eq!(filtered, all);
    assert_eq!(all.total, 3);
}

#[tokio::test]
async fn pages_never_exceed_requested_size() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;
    for i in 0..7 {
        f.service
            .create_post(&ActorId(author), author, 0, draft("t", &format!("post {i}"), &[]))
            .await
            .unwrap();
    }

    for offset in 0..10 {
        let result = f.service.search_posts(PostSearch::default(), page(offset, 3)).await.unwrap();
        assert!(result.items.len() <= 3);
        assert_eq!(result.total, 7);
    }

    // Offset 4 with size 3 lands on page 1: the 4th to 6th posts.
    let second = f.service.search_posts(PostSearch::default(), page(4, 3)).await.unwrap();
    let texts: Vec<_> = second.items.iter().map(|p| p.post_text.as_str()).collect();
    assert_eq!(texts, vec!["post 3", "post 4", "post 5"]);
}

#[tokio::test]
async fn feed_hides_deleted_and_scheduled_posts() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;
    let actor = ActorId(author);

    let visible = f
        .service
        .create_post(&actor, author, millis(2024, 1, 1), draft("t", "visible", &[]))
        .await
        .unwrap();
    let newer = f
        .service
        .create_post(&actor, author, millis(2024, 2, 1), draft("t", "newer", &[]))
        .await
        .unwrap();
    let gone = f
        .service
        .create_post(&actor, author, 0, draft("t", "gone", &[]))
        .await
        .unwrap();
    f.service.delete_post_by_id(&actor, gone.id).await.unwrap();
    f.service
        .create_post(&actor, author, millis(2999, 1, 1), draft("t", "scheduled", &[]))
        .await
        .unwrap();

    let feed = f.service.get_feeds(&actor, page(0, 20)).await.unwrap();
    let ids: Vec<_> = feed.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer.id, visible.id]);
}

#[tokio::test]
async fn blocked_posts_stay_out_of_feed() {
    let f = fixture(Arc::new(CountingNotifier::default()));
    let author = add_user(&f.store, "a@example.com", "Smith").await;
    let actor = ActorId(author);
    let post = f
        .service
        .create_post(&actor, author, millis(2024, 1, 1), draft("t", "body", &[]))
        .await
        .unwrap();

    f.store
        .posts()
        .modify(
            post.id,
            Box::new(|post: &mut Post| -> Result<(), DomainError> {
                post.is_blocked = true;
                Ok(())
            }),
        )
        .await
        .unwrap();

    assert_eq!(f.service.get_feeds(&actor, page(0, 20)).await.unwrap().total, 0);
    assert_eq!(f.service.get_author_wall(author, page(0, 20)).await.unwrap().total, 1);
}
