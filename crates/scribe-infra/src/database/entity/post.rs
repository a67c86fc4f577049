//! Post entity for SeaORM.

use sea_orm::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_handle: String,
    pub author_email: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub markdown_source: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub sanitized_html: Option<String>,
    pub like_count: i64,
    pub created_at: DateTimeWithTimeZone,
    /// Assigned by the database on insert; never written by the application.
    #[sea_orm(unique)]
    pub seq: i64,
}

// Authors are referenced by id only; the two tables share no foreign key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for scribe_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            author_handle: model.author_handle,
            author_email: model.author_email,
            title: model.title,
            content: model.content,
            markdown_source: model.markdown_source,
            sanitized_html: model.sanitized_html,
            like_count: u64::try_from(model.like_count).unwrap_or(0),
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<scribe_core::domain::Post> for ActiveModel {
    fn from(post: scribe_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            author_handle: Set(post.author_handle),
            author_email: Set(post.author_email),
            title: Set(post.title),
            content: Set(post.content),
            markdown_source: Set(post.markdown_source),
            sanitized_html: Set(post.sanitized_html),
            like_count: Set(i64::try_from(post.like_count).unwrap_or(i64::MAX)),
            created_at: Set(post.created_at.into()),
            seq: NotSet,
        }
    }
}
