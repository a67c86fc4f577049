//! Observability module - request ids for tracing and error bodies.

mod request_id;

pub use request_id::{RequestIdMiddleware, current_request_id};
