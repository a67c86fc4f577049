//! Domain entities - the core business objects.

mod post;
mod principal;
mod user;

pub use post::{Body, MAX_TITLE_LEN, Post, PostDraft};
pub use principal::{Principal, ViewMode};
pub use user::{User, mask_email};
