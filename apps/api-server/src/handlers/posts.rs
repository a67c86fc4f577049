//! Post handlers: feed, compose, view, delete and likes.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::domain::PostDraft;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{CreatePostRequest, PostResponse};

use super::mapping;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn feed(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_home_feed().await?;
    let body: Vec<PostResponse> = posts.iter().map(mapping::post).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    tracing::debug!(handle = %identity.handle, markdown = req.markdown.is_some(), "Composing post");
    let draft = PostDraft {
        title: req.title,
        content: req.content,
        markdown: req.markdown,
    };

    let post = state.posts.create_post(&identity.principal(), draft).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(mapping::post(&post))))
}

/// GET /api/posts/{id}
pub async fn show(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let principal = identity.principal();

    let view = state.access.resolve_post(&principal, post_id).await?;

    // Like state is decoration; a failed lookup leaves it unknown.
    let liked = match principal.user_id() {
        Some(user_id) => match state.accounts.find(user_id).await {
            Ok(user) => Some(user.likes(post_id)),
            Err(e) => {
                tracing::debug!(user_id = %user_id, error = %e, "Like state unavailable");
                None
            }
        },
        None => None,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(mapping::post_view(&view, liked))))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .posts
        .delete_post(&identity.principal(), path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(mapping::deleted(outcome))))
}

/// PUT /api/posts/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .posts
        .set_like(&identity.principal(), path.into_inner(), true)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(mapping::like(outcome))))
}

/// DELETE /api/posts/{id}/like
pub async fn unlike(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .posts
        .set_like(&identity.principal(), path.into_inner(), false)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(mapping::like(outcome))))
}
