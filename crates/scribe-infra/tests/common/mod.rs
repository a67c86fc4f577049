#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use scribe_core::domain::{Post, Principal, User};
use scribe_core::ports::{BaseRepository, UserRepository};
use scribe_core::services::{AccessResolver, PostService};
use scribe_infra::{InMemoryPostRepository, InMemoryUserRepository, MarkdownRenderer};

pub struct Harness {
    pub users: Arc<InMemoryUserRepository>,
    pub posts: Arc<InMemoryPostRepository>,
    pub service: Arc<PostService>,
    pub access: AccessResolver,
}

impl Harness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new());
        let service = Arc::new(PostService::new(
            users.clone(),
            posts.clone(),
            Arc::new(MarkdownRenderer::new()),
        ));
        let access = AccessResolver::new(users.clone(), posts.clone());

        Self {
            users,
            posts,
            service,
            access,
        }
    }

    pub async fn user(&self, handle: &str) -> User {
        let user = User::new(
            handle.to_string(),
            format!("{handle}@example.com"),
            "not-a-real-hash".to_string(),
        );
        self.users.insert(user).await.unwrap()
    }

    pub async fn reload_user(&self, id: Uuid) -> User {
        self.users.find_by_id(id).await.unwrap().unwrap()
    }

    pub async fn reload_post(&self, id: Uuid) -> Option<Post> {
        self.posts.find_by_id(id).await.unwrap()
    }

    /// Store a post with a fixed creation time, bypassing compose.
    pub async fn post_at(&self, author: &User, title: &str, created_at: DateTime<Utc>) -> Post {
        let post = Post {
            id: Uuid::new_v4(),
            author_id: author.id,
            author_handle: author.handle.clone(),
            author_email: author.email.clone(),
            title: title.to_string(),
            content: "body".to_string(),
            markdown_source: None,
            sanitized_html: None,
            like_count: 0,
            created_at,
        };
        let post = self.posts.insert(post).await.unwrap();
        self.users.append_post(author.id, post.id).await.unwrap();
        post
    }
}

pub fn principal(user: &User) -> Principal {
    Principal::User(user.id)
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}
