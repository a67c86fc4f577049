//! Content rendering - markdown to sanitized HTML.

mod markdown;

pub use markdown::MarkdownRenderer;
