use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic document store operations.
///
/// No transactional scope spans two repositories.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, in insertion order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Insert a new entity. Fails with `Constraint` if the ID is taken.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if absent.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_handle(&self, handle: &str) -> Result<Option<User>, RepoError>;

    /// Append a post id to the user's post index.
    async fn append_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError>;

    /// Remove a post id from the user's post index. Returns whether it was present.
    async fn remove_post(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError>;

    /// Check-and-set like membership. Returns true only if membership changed.
    async fn set_liked(&self, user_id: Uuid, post_id: Uuid, liked: bool)
    -> Result<bool, RepoError>;
}

/// Canonical post store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts with the given ids. Missing ids are skipped; order is unspecified.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>, RepoError>;

    /// Add `delta` to the like counter, clamping at zero. Returns the updated post.
    async fn adjust_like_count(&self, post_id: Uuid, delta: i64) -> Result<Post, RepoError>;
}
