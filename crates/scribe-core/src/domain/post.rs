use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;
use crate::error::DomainError;
use crate::ports::ContentRenderer;

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Post entity - a blog post in the canonical post store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    /// Author handle at the time of writing. Not updated on profile edits.
    pub author_handle: String,
    pub author_email: String,
    pub title: String,
    pub content: String,
    pub markdown_source: Option<String>,
    /// Always derived from `markdown_source` by a [`ContentRenderer`].
    pub sanitized_html: Option<String>,
    pub like_count: u64,
    pub created_at: DateTime<Utc>,
}

/// What an author submits when composing a post.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub markdown: Option<String>,
}

/// Body to present for a post.
///
/// `Plain` is the legacy unrendered body and must be escaped by whoever displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body<'a> {
    Html(&'a str),
    Plain(&'a str),
}

impl PostDraft {
    /// Markdown source worth rendering, if any.
    pub fn markdown_source(&self) -> Option<&str> {
        self.markdown.as_deref().filter(|m| !m.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("Title must not be empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::Validation(format!(
                "Title must be at most {MAX_TITLE_LEN} characters"
            )));
        }
        if self.content.trim().is_empty() && self.markdown_source().is_none() {
            return Err(DomainError::Validation(
                "Post needs either content or markdown".to_string(),
            ));
        }
        Ok(())
    }
}

impl Post {
    /// Build a new post for `author`, rendering markdown through `renderer`.
    ///
    /// Fails when the draft is invalid or its markdown sanitizes to nothing.
    pub fn compose(
        author: &User,
        draft: PostDraft,
        renderer: &dyn ContentRenderer,
    ) -> Result<Self, DomainError> {
        draft.validate()?;

        let sanitized_html = match draft.markdown_source() {
            Some(source) => {
                let html = renderer.render(source);
                if html.trim().is_empty() {
                    return Err(DomainError::Validation(
                        "Markdown contains no displayable content".to_string(),
                    ));
                }
                Some(html)
            }
            None => None,
        };
        let markdown_source = sanitized_html.as_ref().and(draft.markdown);

        Ok(Self {
            id: Uuid::new_v4(),
            author_id: author.id,
            author_handle: author.handle.clone(),
            author_email: author.email.clone(),
            title: draft.title.trim().to_string(),
            content: draft.content,
            markdown_source,
            sanitized_html,
            like_count: 0,
            created_at: Utc::now(),
        })
    }

    pub fn body(&self) -> Body<'_> {
        match &self.sanitized_html {
            Some(html) => Body::Html(html),
            None => Body::Plain(&self.content),
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Creation time in the short unpadded form shown next to posts, e.g. `2024-3-1 9:05`.
    pub fn display_timestamp(&self) -> String {
        self.created_at.format("%Y-%-m-%-d %-H:%M").to_string()
    }
}
