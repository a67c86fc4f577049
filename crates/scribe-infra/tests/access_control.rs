mod common;

use uuid::Uuid;

use common::{Harness, at, principal};
use scribe_core::DomainError;
use scribe_core::domain::{Principal, ViewMode};
use scribe_core::ports::UserRepository;

#[tokio::test]
async fn owner_sees_own_profile_in_owner_mode() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    h.post_at(&ada, "one", at(2024, 1, 1)).await;

    let view = h
        .access
        .resolve_profile(&principal(&ada), ada.id)
        .await
        .unwrap();

    assert_eq!(view.mode, ViewMode::Owner);
    assert_eq!(view.posts.len(), 1);
}

#[tokio::test]
async fn visitors_get_the_full_post_list() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let bob = h.user("bob").await;
    let first = h.post_at(&ada, "one", at(2024, 1, 1)).await;
    let second = h.post_at(&ada, "two", at(2024, 1, 2)).await;

    for who in [Principal::Anonymous, principal(&bob)] {
        let view = h.access.resolve_profile(&who, ada.id).await.unwrap();
        assert_eq!(view.mode, ViewMode::Visitor);

        let ids: Vec<Uuid> = view.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}

#[tokio::test]
async fn profile_posts_follow_index_order() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    // Index order is append order, not creation time.
    let later = h.post_at(&ada, "later", at(2024, 9, 1)).await;
    let earlier = h.post_at(&ada, "earlier", at(2024, 2, 1)).await;

    let view = h
        .access
        .resolve_profile(&Principal::Anonymous, ada.id)
        .await
        .unwrap();
    let ids: Vec<Uuid> = view.posts.iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![later.id, earlier.id]);
}

#[tokio::test]
async fn stale_index_entries_are_skipped() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let real = h.post_at(&ada, "real", at(2024, 1, 1)).await;
    h.users.append_post(ada.id, Uuid::new_v4()).await.unwrap();

    let view = h
        .access
        .resolve_profile(&principal(&ada), ada.id)
        .await
        .unwrap();

    assert_eq!(view.posts.len(), 1);
    assert_eq!(view.posts[0].id, real.id);
}

#[tokio::test]
async fn missing_profile_is_not_found_for_everyone() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let ghost = Uuid::new_v4();

    for who in [Principal::Anonymous, principal(&ada), Principal::User(ghost)] {
        let result = h.access.resolve_profile(&who, ghost).await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound { entity_type: "User", id }) if id == ghost
        ));
    }
}

#[tokio::test]
async fn post_mode_depends_on_authorship() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let bob = h.user("bob").await;
    let post = h.post_at(&ada, "p", at(2024, 1, 1)).await;

    let owner = h.access.resolve_post(&principal(&ada), post.id).await.unwrap();
    let other = h.access.resolve_post(&principal(&bob), post.id).await.unwrap();
    let anonymous = h
        .access
        .resolve_post(&Principal::Anonymous, post.id)
        .await
        .unwrap();

    assert_eq!(owner.mode, ViewMode::Owner);
    assert_eq!(other.mode, ViewMode::Visitor);
    assert_eq!(anonymous.mode, ViewMode::Visitor);
    assert_eq!(owner.post.id, other.post.id);
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let h = Harness::new();

    let result = h
        .access
        .resolve_post(&Principal::Anonymous, Uuid::new_v4())
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { entity_type: "Post", .. })));
}
