mod common;

use uuid::Uuid;

use common::{Harness, at, principal};
use scribe_core::DomainError;
use scribe_core::domain::{Principal, PostDraft};
use scribe_core::ports::{BaseRepository, ContentRenderer};
use scribe_infra::MarkdownRenderer;

fn draft(markdown: &str) -> PostDraft {
    PostDraft {
        title: "Hello".to_string(),
        content: String::new(),
        markdown: Some(markdown.to_string()),
    }
}

#[tokio::test]
async fn create_post_sanitizes_markdown_and_indexes_it() {
    let h = Harness::new();
    let ada = h.user("ada").await;

    let post = h
        .service
        .create_post(&principal(&ada), draft("# Hi <script>alert(1)</script>"))
        .await
        .unwrap();

    let html = post.sanitized_html.as_deref().unwrap();
    assert!(html.contains("<h1>"));
    assert!(html.contains("Hi"));
    assert!(!html.contains("<script"));

    assert_eq!(post.like_count, 0);
    assert_eq!(post.author_handle, "ada");
    assert!(h.reload_post(post.id).await.is_some());
    assert_eq!(h.reload_user(ada.id).await.post_ids, vec![post.id]);
}

#[tokio::test]
async fn sanitized_html_is_reproducible_from_source() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let source = "Some *markdown* with [a link](https://example.com)";

    let first = h
        .service
        .create_post(&principal(&ada), draft(source))
        .await
        .unwrap();
    let second = h
        .service
        .create_post(&principal(&ada), draft(source))
        .await
        .unwrap();

    let expected = MarkdownRenderer::new().render(source);
    assert_eq!(first.sanitized_html.as_deref(), Some(expected.as_str()));
    assert_eq!(first.sanitized_html, second.sanitized_html);
}

#[tokio::test]
async fn plain_post_keeps_content_and_no_html() {
    let h = Harness::new();
    let ada = h.user("ada").await;

    let post = h
        .service
        .create_post(
            &principal(&ada),
            PostDraft {
                title: "Plain".to_string(),
                content: "<b>not rendered</b>".to_string(),
                markdown: None,
            },
        )
        .await
        .unwrap();

    assert!(post.markdown_source.is_none());
    assert!(post.sanitized_html.is_none());
    assert_eq!(post.content, "<b>not rendered</b>");
}

#[tokio::test]
async fn anonymous_cannot_compose() {
    let h = Harness::new();

    let result = h
        .service
        .create_post(&Principal::Anonymous, draft("hello"))
        .await;

    assert!(matches!(result, Err(DomainError::Unauthenticated)));
    assert!(h.posts.is_empty().await);
}

#[tokio::test]
async fn missing_author_aborts_before_any_write() {
    let h = Harness::new();

    let result = h
        .service
        .create_post(&Principal::User(Uuid::new_v4()), draft("hello"))
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { entity_type: "User", .. })));
    assert!(h.posts.is_empty().await);
}

#[tokio::test]
async fn invalid_draft_is_rejected() {
    let h = Harness::new();
    let ada = h.user("ada").await;

    let result = h
        .service
        .create_post(
            &principal(&ada),
            PostDraft {
                title: "   ".to_string(),
                content: "body".to_string(),
                markdown: None,
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));

    let script_only = h
        .service
        .create_post(&principal(&ada), draft("<script>alert(1)</script>"))
        .await;
    assert!(matches!(script_only, Err(DomainError::Validation(_))));

    assert!(h.posts.is_empty().await);
    assert!(h.reload_user(ada.id).await.post_ids.is_empty());
}

#[tokio::test]
async fn liking_twice_counts_once() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let bob = h.user("bob").await;
    let post = h.post_at(&ada, "p", at(2024, 1, 1)).await;

    let first = h
        .service
        .set_like(&principal(&bob), post.id, true)
        .await
        .unwrap();
    let second = h
        .service
        .set_like(&principal(&bob), post.id, true)
        .await
        .unwrap();

    assert!(first.changed);
    assert!(!second.changed);
    assert_eq!(second.like_count, 1);
    assert_eq!(h.reload_post(post.id).await.unwrap().like_count, 1);

    let bob = h.reload_user(bob.id).await;
    assert_eq!(
        bob.liked_post_ids.iter().filter(|id| **id == post.id).count(),
        1
    );
}

#[tokio::test]
async fn like_then_unlike_restores_count() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let bob = h.user("bob").await;
    let cat = h.user("cat").await;
    let post = h.post_at(&ada, "p", at(2024, 1, 1)).await;

    h.service
        .set_like(&principal(&cat), post.id, true)
        .await
        .unwrap();
    let before = h.reload_post(post.id).await.unwrap().like_count;

    h.service
        .set_like(&principal(&bob), post.id, true)
        .await
        .unwrap();
    let outcome = h
        .service
        .set_like(&principal(&bob), post.id, false)
        .await
        .unwrap();

    assert_eq!(outcome.like_count, before);
    assert!(!outcome.liked);
    assert!(!h.reload_user(bob.id).await.likes(post.id));
}

#[tokio::test]
async fn unlike_without_like_is_a_no_op() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let bob = h.user("bob").await;
    let post = h.post_at(&ada, "p", at(2024, 1, 1)).await;
    h.service
        .set_like(&principal(&ada), post.id, true)
        .await
        .unwrap();

    let outcome = h
        .service
        .set_like(&principal(&bob), post.id, false)
        .await
        .unwrap();

    assert!(!outcome.changed);
    assert_eq!(outcome.like_count, 1);
}

#[tokio::test]
async fn like_requires_principal_and_existing_post() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let post = h.post_at(&ada, "p", at(2024, 1, 1)).await;

    let anonymous = h
        .service
        .set_like(&Principal::Anonymous, post.id, true)
        .await;
    assert!(matches!(anonymous, Err(DomainError::Unauthenticated)));

    let missing = h
        .service
        .set_like(&principal(&ada), Uuid::new_v4(), true)
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { entity_type: "Post", .. })));

    assert!(h.reload_user(ada.id).await.liked_post_ids.is_empty());
    assert_eq!(h.reload_post(post.id).await.unwrap().like_count, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_likes_from_distinct_users_all_count() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let post_id = h.post_at(&ada, "p", at(2024, 1, 1)).await.id;

    let mut likers = Vec::new();
    for i in 0..16 {
        likers.push(h.user(&format!("fan{i}")).await);
    }

    let tasks: Vec<_> = likers
        .iter()
        .map(|user| {
            let service = h.service.clone();
            let who = principal(user);
            tokio::spawn(async move { service.set_like(&who, post_id, true).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(h.reload_post(post_id).await.unwrap().like_count, 16);
}

#[tokio::test]
async fn delete_removes_post_and_index_entry() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let keep = h.post_at(&ada, "keep", at(2024, 1, 1)).await;
    let gone = h.post_at(&ada, "gone", at(2024, 1, 2)).await;

    let outcome = h
        .service
        .delete_post(&principal(&ada), gone.id)
        .await
        .unwrap();

    assert!(outcome.author_found);
    assert!(h.reload_post(gone.id).await.is_none());
    assert_eq!(h.reload_user(ada.id).await.post_ids, vec![keep.id]);
}

#[tokio::test]
async fn deleted_post_leaves_likers_working() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let bob = h.user("bob").await;
    let keep = h.post_at(&ada, "keep", at(2024, 1, 1)).await;
    let gone = h.post_at(&ada, "gone", at(2024, 1, 2)).await;

    h.service
        .set_like(&principal(&bob), gone.id, true)
        .await
        .unwrap();
    h.service
        .delete_post(&principal(&ada), gone.id)
        .await
        .unwrap();

    // The stale id stays in the liker's set but no longer resolves.
    assert!(h.reload_user(bob.id).await.likes(gone.id));
    let relike = h.service.set_like(&principal(&bob), gone.id, true).await;
    assert!(matches!(relike, Err(DomainError::NotFound { entity_type: "Post", .. })));

    let outcome = h
        .service
        .set_like(&principal(&bob), keep.id, true)
        .await
        .unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.like_count, 1);

    let feed = h.service.list_home_feed().await.unwrap();
    assert_eq!(feed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![keep.id]);
    assert_eq!(feed[0].like_count, 1);
}

#[tokio::test]
async fn only_the_author_may_delete() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let bob = h.user("bob").await;
    let post = h.post_at(&ada, "p", at(2024, 1, 1)).await;

    let result = h.service.delete_post(&principal(&bob), post.id).await;
    assert!(matches!(result, Err(DomainError::Forbidden)));

    let anonymous = h.service.delete_post(&Principal::Anonymous, post.id).await;
    assert!(matches!(anonymous, Err(DomainError::Unauthenticated)));

    assert!(h.reload_post(post.id).await.is_some());
    assert_eq!(h.reload_user(ada.id).await.post_ids, vec![post.id]);
}

#[tokio::test]
async fn deleting_missing_post_is_not_found() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let post = h.post_at(&ada, "p", at(2024, 1, 1)).await;

    let result = h
        .service
        .delete_post(&principal(&ada), Uuid::new_v4())
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { entity_type: "Post", .. })));
    assert_eq!(h.reload_user(ada.id).await.post_ids, vec![post.id]);
}

#[tokio::test]
async fn delete_proceeds_when_author_record_is_gone() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let post = h.post_at(&ada, "p", at(2024, 1, 1)).await;
    h.users.delete(ada.id).await.unwrap();

    let outcome = h
        .service
        .delete_post(&principal(&ada), post.id)
        .await
        .unwrap();

    assert!(!outcome.author_found);
    assert!(h.reload_post(post.id).await.is_none());
}

#[tokio::test]
async fn home_feed_orders_by_calendar_time() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    // As unpadded strings "2024-3-1" would sort after "2024-10-1".
    let march = h.post_at(&ada, "march", at(2024, 3, 1)).await;
    let october = h.post_at(&ada, "october", at(2024, 10, 1)).await;
    let february = h.post_at(&ada, "february", at(2024, 2, 15)).await;

    let feed = h.service.list_home_feed().await.unwrap();
    let ids: Vec<Uuid> = feed.iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![october.id, march.id, february.id]);
    assert!(feed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn home_feed_ties_keep_insertion_order() {
    let h = Harness::new();
    let ada = h.user("ada").await;
    let first = h.post_at(&ada, "first", at(2024, 5, 5)).await;
    let second = h.post_at(&ada, "second", at(2024, 5, 5)).await;
    let newer = h.post_at(&ada, "newer", at(2024, 6, 1)).await;

    let ids: Vec<Uuid> = h
        .service
        .list_home_feed()
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(ids, vec![newer.id, first.id, second.id]);
}
