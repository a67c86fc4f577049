//! Registration and credential checks.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{User, mask_email};
use crate::error::DomainError;
use crate::ports::{PasswordService, UserRepository};

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_HANDLE_LEN: usize = 32;

/// Input to [`AccountService::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub handle: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    fn normalized(self) -> Self {
        Self {
            handle: self.handle.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.handle.is_empty() || self.handle.chars().count() > MAX_HANDLE_LEN {
            return Err(DomainError::Validation(format!(
                "Handle must be 1 to {MAX_HANDLE_LEN} characters"
            )));
        }
        if !self
            .handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::Validation(
                "Handle may only contain letters, digits, '_' and '-'".to_string(),
            ));
        }
        if self.email.is_empty() || !self.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        let registration = registration.normalized();
        registration.validate()?;

        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Err(DomainError::Duplicate("Email already registered".to_string()));
        }
        if self
            .users
            .find_by_handle(&registration.handle)
            .await?
            .is_some()
        {
            return Err(DomainError::Duplicate("Handle already taken".to_string()));
        }

        let password_hash = self
            .passwords
            .hash(&registration.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = User::new(registration.handle, registration.email, password_hash);
        let user = self.users.insert(user).await?;

        tracing::info!(user_id = %user.id, email = %mask_email(&user.email), "User registered");
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password are indistinguishable.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::debug!(email = %mask_email(&email), "Login for unknown email");
            return Err(DomainError::Unauthenticated);
        };

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if !valid {
            return Err(DomainError::Unauthenticated);
        }
        Ok(user)
    }

    pub async fn find(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }
}
