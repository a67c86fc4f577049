//! Domain to wire conversions.

use scribe_core::domain::{Body, Post, User, ViewMode};
use scribe_core::services::{DeleteOutcome, LikeOutcome, PostView, ProfileView};
use scribe_shared::dto::{
    DeleteResponse, LikeResponse, PostBody, PostResponse, PostViewResponse, ProfileResponse,
    ProfileUser, UserResponse, ViewModeDto,
};

pub fn view_mode(mode: ViewMode) -> ViewModeDto {
    match mode {
        ViewMode::Owner => ViewModeDto::Owner,
        ViewMode::Visitor => ViewModeDto::Visitor,
    }
}

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        handle: user.handle.clone(),
        email: user.email.clone(),
        created_at: user.created_at,
    }
}

pub fn post(post: &Post) -> PostResponse {
    let body = match post.body() {
        Body::Html(html) => PostBody::Html(html.to_string()),
        Body::Plain(text) => PostBody::Plain(text.to_string()),
    };

    PostResponse {
        id: post.id,
        author_id: post.author_id,
        author_handle: post.author_handle.clone(),
        title: post.title.clone(),
        body,
        markdown_source: post.markdown_source.clone(),
        like_count: post.like_count,
        created_at: post.created_at,
        display_time: post.display_timestamp(),
    }
}

/// The owner also sees their own email address.
pub fn profile(view: &ProfileView) -> ProfileResponse {
    ProfileResponse {
        mode: view_mode(view.mode),
        user: ProfileUser {
            id: view.user.id,
            handle: view.user.handle.clone(),
            email: view.mode.is_owner().then(|| view.user.email.clone()),
            post_count: view.posts.len(),
        },
        posts: view.posts.iter().map(post).collect(),
    }
}

pub fn post_view(view: &PostView, liked: Option<bool>) -> PostViewResponse {
    PostViewResponse {
        mode: view_mode(view.mode),
        post: post(&view.post),
        liked,
    }
}

pub fn like(outcome: LikeOutcome) -> LikeResponse {
    LikeResponse {
        post_id: outcome.post_id,
        liked: outcome.liked,
        like_count: outcome.like_count,
        changed: outcome.changed,
    }
}

pub fn deleted(outcome: DeleteOutcome) -> DeleteResponse {
    DeleteResponse {
        post_id: outcome.post_id,
        author_found: outcome.author_found,
    }
}
