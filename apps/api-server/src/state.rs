//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{PasswordService, PostRepository, UserRepository};
use scribe_core::services::{AccessResolver, AccountService, PostService};
use scribe_infra::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository, MarkdownRenderer};

#[cfg(feature = "postgres")]
use scribe_infra::{PostgresPostRepository, PostgresUserRepository, database::connect};

/// Which document store backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Postgres,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Memory => "memory",
            StoreKind::Postgres => "postgres",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub posts: Arc<PostService>,
    pub access: Arc<AccessResolver>,
    pub store: StoreKind,
}

impl AppState {
    /// Build the state on PostgreSQL when configured, falling back to memory.
    pub async fn new(
        db_config: Option<&DatabaseConfig>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        match db_config {
            Some(config) => Self::from_database(config, passwords).await,
            None => {
                tracing::warn!("DATABASE_URL not set, running on the in-memory store");
                Self::in_memory(passwords)
            }
        }
    }

    #[cfg(feature = "postgres")]
    async fn from_database(config: &DatabaseConfig, passwords: Arc<dyn PasswordService>) -> Self {
        match connect(config).await {
            Ok(conn) => Self::with_stores(
                Arc::new(PostgresUserRepository::new(conn.clone())),
                Arc::new(PostgresPostRepository::new(conn)),
                passwords,
                StoreKind::Postgres,
            ),
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database, using in-memory store");
                Self::in_memory(passwords)
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn from_database(_config: &DatabaseConfig, passwords: Arc<dyn PasswordService>) -> Self {
        tracing::warn!("Built without postgres feature, ignoring DATABASE_URL");
        Self::in_memory(passwords)
    }

    pub fn in_memory(passwords: Arc<dyn PasswordService>) -> Self {
        Self::with_stores(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            passwords,
            StoreKind::Memory,
        )
    }

    fn with_stores(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        passwords: Arc<dyn PasswordService>,
        store: StoreKind,
    ) -> Self {
        let renderer = Arc::new(MarkdownRenderer::new());

        tracing::info!(store = store.as_str(), "Application state initialized");

        Self {
            accounts: Arc::new(AccountService::new(users.clone(), passwords)),
            posts: Arc::new(PostService::new(users.clone(), posts.clone(), renderer)),
            access: Arc::new(AccessResolver::new(users, posts)),
            store,
        }
    }
}
