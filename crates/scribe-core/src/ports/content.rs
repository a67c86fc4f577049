//! Content rendering port.

/// Turns untrusted markdown into an HTML fragment that is safe to embed verbatim.
///
/// Implementations never fail: malformed input renders whatever structure the
/// parser recovers.
pub trait ContentRenderer: Send + Sync {
    /// Parse markdown and sanitize the resulting HTML.
    fn render(&self, markdown: &str) -> String;

    /// Sanitize an HTML fragment. Applying it to its own output is a no-op.
    fn sanitize(&self, html: &str) -> String;
}
