//! # Scribe Core
//!
//! The domain layer of the Scribe blogging service.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the access decision, the post/like consistency rules and the
//! ports that storage, auth and content rendering must implement.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
