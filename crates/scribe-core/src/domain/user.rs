use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an account that can author and like posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub handle: String,
    pub email: String,
    pub password_hash: String,
    /// Subject id at an external identity provider, when the account is linked.
    pub external_id: Option<String>,
    /// Ids of this user's posts in the canonical post store, oldest first.
    pub post_ids: Vec<Uuid>,
    pub liked_post_ids: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(handle: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            handle,
            email,
            password_hash,
            external_id: None,
            post_ids: Vec::new(),
            liked_post_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn likes(&self, post_id: Uuid) -> bool {
        self.liked_post_ids.contains(&post_id)
    }

    /// Set like membership for a post. Returns true only when membership changed.
    pub fn set_liked(&mut self, post_id: Uuid, liked: bool) -> bool {
        let changed = if liked {
            self.liked_post_ids.insert(post_id)
        } else {
            self.liked_post_ids.remove(&post_id)
        };
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Append a post id to the index, ignoring ids already present.
    pub fn append_post(&mut self, post_id: Uuid) -> bool {
        if self.post_ids.contains(&post_id) {
            return false;
        }
        self.post_ids.push(post_id);
        self.updated_at = Utc::now();
        true
    }

    pub fn remove_post(&mut self, post_id: Uuid) -> bool {
        let before = self.post_ids.len();
        self.post_ids.retain(|id| *id != post_id);
        let removed = self.post_ids.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

/// Mask the local part of an email so it can be logged without PII.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}
