//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub handle: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user's public information. Credentials are never included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub handle: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Request to compose a post. Supplying `markdown` makes it a rendered post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub markdown: Option<String>,
}

/// How a post body should be presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", content = "value", rename_all = "lowercase")]
pub enum PostBody {
    /// Already sanitized, safe to insert as markup.
    Html(String),
    /// Unrendered text, must be escaped on display.
    Plain(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_handle: String,
    pub title: String,
    pub body: PostBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_source: Option<String>,
    pub like_count: u64,
    pub created_at: DateTime<Utc>,
    /// Short form such as `2024-3-1 9:05`.
    pub display_time: String,
}

/// Owner or visitor, as decided for the requesting principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewModeDto {
    Owner,
    Visitor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub mode: ViewModeDto,
    pub user: ProfileUser,
    pub posts: Vec<PostResponse>,
}

/// Profile header. Email is only shown to the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUser {
    pub id: Uuid,
    pub handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub post_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostViewResponse {
    pub mode: ViewModeDto,
    pub post: PostResponse,
    /// Whether the requesting user likes this post. Absent for anonymous callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub post_id: Uuid,
    pub liked: bool,
    pub like_count: u64,
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub post_id: Uuid,
    pub author_found: bool,
}
