//! The caller of an operation and the two-state view decision derived from it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identity attached to an incoming request.
///
/// Every core operation takes the principal explicitly; nothing reads it from
/// ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Principal {
    #[default]
    Anonymous,
    User(Uuid),
}

impl Principal {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Principal::Anonymous => None,
            Principal::User(id) => Some(*id),
        }
    }

    /// The authenticated user id, or `Unauthenticated`.
    pub fn require_user(&self) -> Result<Uuid, DomainError> {
        self.user_id().ok_or(DomainError::Unauthenticated)
    }

    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id() == Some(user_id)
    }
}

impl From<Option<Uuid>> for Principal {
    fn from(id: Option<Uuid>) -> Self {
        id.map_or(Principal::Anonymous, Principal::User)
    }
}

/// Which affordances a viewer gets for a profile or post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Owner,
    Visitor,
}

impl ViewMode {
    /// Owner when the principal is the resource's owner, visitor otherwise.
    pub fn resolve(principal: &Principal, owner_id: Uuid) -> Self {
        if principal.is(owner_id) {
            ViewMode::Owner
        } else {
            ViewMode::Visitor
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, ViewMode::Owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_always_visitor() {
        assert_eq!(
            ViewMode::resolve(&Principal::Anonymous, Uuid::new_v4()),
            ViewMode::Visitor
        );
    }

    #[test]
    fn owner_matches_on_id() {
        let id = Uuid::new_v4();
        assert_eq!(ViewMode::resolve(&Principal::User(id), id), ViewMode::Owner);
        assert_eq!(
            ViewMode::resolve(&Principal::User(Uuid::new_v4()), id),
            ViewMode::Visitor
        );
    }

    #[test]
    fn require_user_fails_closed() {
        assert!(matches!(
            Principal::Anonymous.require_user(),
            Err(DomainError::Unauthenticated)
        ));
        let id = Uuid::new_v4();
        assert_eq!(Principal::from(Some(id)).require_user().unwrap(), id);
    }

    #[test]
    fn view_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ViewMode::Owner).unwrap(), "\"owner\"");
        assert_eq!(serde_json::to_string(&ViewMode::Visitor).unwrap(), "\"visitor\"");
    }
}
