//! # Scribe Shared
//!
//! Wire types for the HTTP API. Kept free of domain logic so a client can
//! depend on this crate alone.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
