//! Owner/visitor resolution for profiles and posts.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, Principal, User, ViewMode};
use crate::error::DomainError;
use crate::ports::{PostRepository, UserRepository};

/// A profile as seen by one principal. The post list is never filtered.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub mode: ViewMode,
    pub user: User,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone)]
pub struct PostView {
    pub mode: ViewMode,
    pub post: Post,
}

/// Resolves which view mode a principal gets for a resource.
///
/// This is a coarse two-state decision: nothing is redacted, only the mode
/// differs between owner and visitor.
pub struct AccessResolver {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
}

impl AccessResolver {
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { users, posts }
    }

    pub async fn resolve_profile(
        &self,
        principal: &Principal,
        user_id: Uuid,
    ) -> Result<ProfileView, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        let mut by_id: HashMap<Uuid, Post> = self
            .posts
            .find_by_ids(&user.post_ids)
            .await?
            .into_iter()
            .map(|post| (post.id, post))
            .collect();

        let mut posts = Vec::with_capacity(user.post_ids.len());
        for post_id in &user.post_ids {
            match by_id.remove(post_id) {
                Some(post) => posts.push(post),
                None => tracing::warn!(
                    user_id = %user.id,
                    post_id = %post_id,
                    "Post index references a missing post"
                ),
            }
        }

        let mode = ViewMode::resolve(principal, user.id);
        tracing::debug!(user_id = %user.id, ?mode, posts = posts.len(), "Profile resolved");

        Ok(ProfileView { mode, user, posts })
    }

    pub async fn resolve_post(
        &self,
        principal: &Principal,
        post_id: Uuid,
    ) -> Result<PostView, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        let mode = ViewMode::resolve(principal, post.author_id);
        Ok(PostView { mode, post })
    }
}
