pub mod post;
pub mod user;

use sea_orm::EntityTrait;

/// Entities whose rows carry a database-assigned, increasing `seq` column.
pub trait InsertionOrdered: EntityTrait {
    fn seq_column() -> Self::Column;
}

impl InsertionOrdered for post::Entity {
    fn seq_column() -> post::Column {
        post::Column::Seq
    }
}

impl InsertionOrdered for user::Entity {
    fn seq_column() -> user::Column {
        user::Column::Seq
    }
}
