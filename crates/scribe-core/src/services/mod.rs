//! Application services - the operations exposed to the HTTP layer.
//!
//! Each service holds its ports behind `Arc<dyn ...>` and takes the calling
//! [`Principal`](crate::domain::Principal) as an explicit argument.

mod access;
mod accounts;
mod posts;

pub use access::{AccessResolver, PostView, ProfileView};
pub use accounts::{AccountService, MIN_PASSWORD_LEN, Registration};
pub use posts::{DeleteOutcome, LikeOutcome, PostService, sort_newest_first};
