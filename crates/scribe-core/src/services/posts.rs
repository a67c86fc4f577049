//! Post/user consistency manager.
//!
//! Posts live in one canonical store; each user keeps an ordered index of
//! their post ids plus the set of post ids they like. Writes that touch both
//! stores are sequential and not transactional: a failure between the two
//! steps leaves the index stale until the next write that repairs it.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Post, PostDraft, Principal};
use crate::error::{DomainError, RepoError};
use crate::ports::{ContentRenderer, PostRepository, UserRepository};

/// Result of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub post_id: Uuid,
    /// False when the author record was gone and only the canonical post was removed.
    pub author_found: bool,
}

/// Like state after a `set_like` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeOutcome {
    pub post_id: Uuid,
    pub liked: bool,
    pub like_count: u64,
    /// Whether this call changed anything.
    pub changed: bool,
}

pub struct PostService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    renderer: Arc<dyn ContentRenderer>,
}

impl PostService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        renderer: Arc<dyn ContentRenderer>,
    ) -> Self {
        Self {
            users,
            posts,
            renderer,
        }
    }

    /// Compose a post as `principal`.
    ///
    /// The author is loaded before any write, so a missing author leaves both
    /// stores untouched.
    pub async fn create_post(
        &self,
        principal: &Principal,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let author_id = principal.require_user()?;
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(author_id))?;

        let post = Post::compose(&author, draft, self.renderer.as_ref())?;
        let post = self.posts.insert(post).await?;

        if let Err(e) = self.users.append_post(author_id, post.id).await {
            tracing::error!(
                post_id = %post.id,
                author_id = %author_id,
                error = %e,
                "Post stored but author index not updated"
            );
            return Err(match e {
                RepoError::NotFound => DomainError::user_not_found(author_id),
                other => other.into(),
            });
        }

        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    /// Delete a post owned by `principal`.
    ///
    /// A missing post aborts with no writes. A missing author does not: the
    /// canonical post is still removed and the outcome says so.
    ///
    /// Likers' `liked_post_ids` are left alone. A stale id there is only ever
    /// tested for membership against a post that exists, so it is never seen.
    pub async fn delete_post(
        &self,
        principal: &Principal,
        post_id: Uuid,
    ) -> Result<DeleteOutcome, DomainError> {
        let caller = principal.require_user()?;
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        if !post.is_authored_by(caller) {
            return Err(DomainError::Forbidden);
        }

        let author_found = match self.users.remove_post(post.author_id, post_id).await {
            Ok(removed) => {
                if !removed {
                    tracing::warn!(post_id = %post_id, "Post was not in its author's index");
                }
                true
            }
            Err(RepoError::NotFound) => {
                tracing::warn!(
                    post_id = %post_id,
                    author_id = %post.author_id,
                    "Author missing, deleting canonical post only"
                );
                false
            }
            Err(e) => return Err(e.into()),
        };

        self.posts.delete(post_id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(post_id),
            other => other.into(),
        })?;

        tracing::info!(post_id = %post_id, author_found, "Post deleted");
        Ok(DeleteOutcome {
            post_id,
            author_found,
        })
    }

    /// Set or clear `principal`'s like on a post.
    ///
    /// The user's liked set decides whether anything happens; the counter is
    /// only touched on an actual transition, so repeats are no-ops.
    pub async fn set_like(
        &self,
        principal: &Principal,
        post_id: Uuid,
        liked: bool,
    ) -> Result<LikeOutcome, DomainError> {
        let user_id = principal.require_user()?;
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        let changed = self
            .users
            .set_liked(user_id, post_id, liked)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::user_not_found(user_id),
                other => other.into(),
            })?;

        let like_count = if changed {
            let delta = if liked { 1 } else { -1 };
            self.posts
                .adjust_like_count(post_id, delta)
                .await
                .map_err(|e| match e {
                    RepoError::NotFound => DomainError::post_not_found(post_id),
                    other => other.into(),
                })?
                .like_count
        } else {
            post.like_count
        };

        tracing::debug!(post_id = %post_id, user_id = %user_id, liked, changed, like_count, "Like set");
        Ok(LikeOutcome {
            post_id,
            liked,
            like_count,
            changed,
        })
    }

    /// Every post, newest first.
    pub async fn list_home_feed(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.posts.find_all().await?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }
}

/// Sort by creation time, newest first. Equal timestamps keep their input order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
