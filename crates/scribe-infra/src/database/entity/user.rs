//! User entity for SeaORM.
//!
//! The post index and liked set are stored as JSONB arrays of UUID strings.

use std::collections::BTreeSet;

use sea_orm::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub handle: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    #[sea_orm(nullable)]
    pub external_id: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub post_ids: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub liked_post_ids: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    /// Assigned by the database on insert; never written by the application.
    #[sea_orm(unique)]
    pub seq: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn encode_ids<'a>(ids: impl IntoIterator<Item = &'a Uuid>) -> Json {
    Json::Array(ids.into_iter().map(|id| Json::String(id.to_string())).collect())
}

fn decode_ids<C: DeserializeOwned + Default>(user_id: Uuid, column: &str, value: Json) -> C {
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(user_id = %user_id, column, error = %e, "Unreadable id list, treating as empty");
        C::default()
    })
}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for scribe_core::domain::User {
    fn from(model: Model) -> Self {
        let post_ids: Vec<Uuid> = decode_ids(model.id, "post_ids", model.post_ids);
        let liked_post_ids: BTreeSet<Uuid> =
            decode_ids(model.id, "liked_post_ids", model.liked_post_ids);

        Self {
            id: model.id,
            handle: model.handle,
            email: model.email,
            password_hash: model.password_hash,
            external_id: model.external_id,
            post_ids,
            liked_post_ids,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<scribe_core::domain::User> for ActiveModel {
    fn from(user: scribe_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            handle: Set(user.handle),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            external_id: Set(user.external_id),
            post_ids: Set(encode_ids(&user.post_ids)),
            liked_post_ids: Set(encode_ids(&user.liked_post_ids)),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
            seq: NotSet,
        }
    }
}
