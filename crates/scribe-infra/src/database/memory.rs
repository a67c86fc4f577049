//! In-memory document store - used when no database is configured and in tests.
//!
//! Each call takes the table lock once, so single-document operations such as
//! the like check-and-set and the counter bump are atomic. Nothing spans two
//! tables. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository, UserRepository};

/// A record the in-memory store can hold.
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    /// Describe a unique-field clash with an existing record, if any.
    fn conflicts_with(&self, _other: &Self) -> Option<String> {
        None
    }
}

impl Document for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        if self.email == other.email {
            Some("Email already registered".to_string())
        } else if self.handle == other.handle {
            Some("Handle already taken".to_string())
        } else {
            None
        }
    }
}

impl Document for Post {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Rows keyed by id, remembering insertion order.
struct Table<T> {
    rows: HashMap<Uuid, T>,
    order: Vec<Uuid>,
}

impl<T: Document> Table<T> {
    fn new() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn all(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.rows.get(id).cloned())
            .collect()
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.order
            .iter()
            .filter_map(|id| self.rows.get(id))
            .find(|row| predicate(*row))
            .cloned()
    }

    fn insert(&mut self, row: T) -> Result<(), RepoError> {
        let id = row.id();
        if self.rows.contains_key(&id) {
            return Err(RepoError::Constraint(format!("Duplicate id {id}")));
        }
        if let Some(reason) = self.rows.values().find_map(|other| row.conflicts_with(other)) {
            return Err(RepoError::Constraint(reason));
        }
        self.rows.insert(id, row);
        self.order.push(id);
        Ok(())
    }

    fn replace(&mut self, row: T) -> Result<(), RepoError> {
        let id = row.id();
        let conflict = self
            .rows
            .values()
            .filter(|other| other.id() != id)
            .find_map(|other| row.conflicts_with(other));
        if let Some(reason) = conflict {
            return Err(RepoError::Constraint(reason));
        }
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(RepoError::NotFound),
        }
    }

    fn remove(&mut self, id: Uuid) -> Result<(), RepoError> {
        if self.rows.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        self.order.retain(|existing| *existing != id);
        Ok(())
    }
}

/// Generic in-memory repository.
pub struct InMemoryRepository<T> {
    table: RwLock<Table<T>>,
}

impl<T: Document> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T: Document> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.table.read().await.all())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        self.table.write().await.insert(entity.clone())?;
        Ok(entity)
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        self.table.write().await.replace(entity.clone())?;
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.table.write().await.remove(id)
    }
}

/// In-memory user repository.
pub type InMemoryUserRepository = InMemoryRepository<User>;

/// In-memory post repository.
pub type InMemoryPostRepository = InMemoryRepository<Post>;

impl InMemoryUserRepository {
    async fn update<R>(
        &self,
        user_id: Uuid,
        apply: impl FnOnce(&mut User) -> R,
    ) -> Result<R, RepoError> {
        let mut table = self.table.write().await;
        let user = table.rows.get_mut(&user_id).ok_or(RepoError::NotFound)?;
        Ok(apply(user))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.table.read().await.find(|user| user.email == email))
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .table
            .read()
            .await
            .find(|user| user.handle == handle))
    }

    async fn append_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        self.update(user_id, |user| {
            user.append_post(post_id);
        })
        .await
    }

    async fn remove_post(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        self.update(user_id, |user| user.remove_post(post_id)).await
    }

    async fn set_liked(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        liked: bool,
    ) -> Result<bool, RepoError> {
        self.update(user_id, |user| user.set_liked(post_id, liked)).await
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    async fn adjust_like_count(&self, post_id: Uuid, delta: i64) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let post = table.rows.get_mut(&post_id).ok_or(RepoError::NotFound)?;
        post.like_count = post.like_count.saturating_add_signed(delta);
        Ok(post.clone())
    }
}
