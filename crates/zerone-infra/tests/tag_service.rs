//! Tag service behaviour over the in-memory store.

use std::num::NonZeroU64;
use std::sync::Arc;

use zerone_core::error::DomainError;
use zerone_core::pagination::PageRequest;
use zerone_core::services::TagService;
use zerone_infra::MemoryStore;

fn page(offset: u64, size: u64) -> PageRequest {
    PageRequest::from_offset(offset, NonZeroU64::new(size).unwrap())
}

async fn seeded(texts: &[&str]) -> TagService {
    let service = TagService::new(Arc::new(MemoryStore::new().tags()));
    for text in texts {
        service.add_tag(text.to_string()).await.unwrap();
    }
    service
}

#[tokio::test]
async fn empty_filter_returns_every_tag() {
    let service = seeded(&["rust", "go", "trust", "zig"]).await;

    for (offset, size) in [(0, 2), (2, 2), (0, 10), (3, 1)] {
        let filtered = service.get_all_tags("", page(offset, size)).await.unwrap();
        assert_eq!(filtered.total, 4);
        assert!(filtered.items.len() as u64 <= size);
    }

    let all = service.get_all_tags("", page(0, 10)).await.unwrap();
    let texts: Vec<_> = all.items.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(texts, vec!["rust", "go", "trust", "zig"]);
}

#[tokio::test]
async fn filter_matches_substrings() {
    let service = seeded(&["rust", "go", "trust"]).await;

    let found = service.get_all_tags("rust", page(0, 10)).await.unwrap();
    let texts: Vec<_> = found.items.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(texts, vec!["rust", "trust"]);
}

#[tokio::test]
async fn filter_wildcards_match_literally() {
    let service = seeded(&["c_d", "cxd", "100%", "1000"]).await;

    let found = service.get_all_tags("c_d", page(0, 10)).await.unwrap();
    let texts: Vec<_> = found.items.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(texts, vec!["c_d"]);

    let found = service.get_all_tags("0%", page(0, 10)).await.unwrap();
    let texts: Vec<_> = found.items.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(texts, vec!["100%"]);
}

#[tokio::test]
async fn duplicate_tag_is_rejected() {
    let service = seeded(&["rust"]).await;

    let result = service.add_tag("rust".to_string()).await;
    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn blank_tag_is_rejected() {
    let service = seeded(&[]).await;

    let result = service.add_tag("   ".to_string()).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn delete_removes_tag() {
    let service = seeded(&["rust", "go"]).await;
    let rust = service.get_all_tags("rust", page(0, 10)).await.unwrap().items[0].clone();

    service.delete_tag(rust.id).await.unwrap();

    assert_eq!(service.get_all_tags("", page(0, 10)).await.unwrap().total, 1);
    assert!(matches!(
        service.delete_tag(rust.id).await,
        Err(DomainError::NotFound { entity_type: "Tag", .. })
    ));
}
