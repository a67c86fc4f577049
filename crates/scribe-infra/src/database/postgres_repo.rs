//! PostgreSQL repository implementations.
//!
//! Index and like-set updates are read-modify-write on the user row; the like
//! counter is bumped in a single UPDATE. Neither spans both tables.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use scribe_core::domain::{Post, User, mask_email};
use scribe_core::error::RepoError;
use scribe_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

impl PostgresUserRepository {
    async fn find_one(
        &self,
        filter: impl sea_orm::sea_query::IntoCondition,
    ) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(filter)
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn modify<R>(
        &self,
        user_id: Uuid,
        apply: impl FnOnce(&mut User) -> R,
    ) -> Result<R, RepoError> {
        let mut user: User = UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(repo_error)?
            .ok_or(RepoError::NotFound)?
            .into();

        let result = apply(&mut user);

        let active_model: user::ActiveModel = user.into();
        active_model.update(&self.db).await.map_err(repo_error)?;
        Ok(result)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");
        self.find_one(user::Column::Email.eq(email)).await
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<User>, RepoError> {
        self.find_one(user::Column::Handle.eq(handle)).await
    }

    async fn append_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        self.modify(user_id, |user| {
            user.append_post(post_id);
        })
        .await
    }

    async fn remove_post(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        self.modify(user_id, |user| user.remove_post(post_id)).await
    }

    async fn set_liked(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        liked: bool,
    ) -> Result<bool, RepoError> {
        self.modify(user_id, |user| user.set_liked(post_id, liked)).await
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = PostEntity::find()
            .filter(post::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn adjust_like_count(&self, post_id: Uuid, delta: i64) -> Result<Post, RepoError> {
        let mut update = PostEntity::update_many()
            .col_expr(
                post::Column::LikeCount,
                Expr::col(post::Column::LikeCount).add(delta),
            )
            .filter(post::Column::Id.eq(post_id));
        if delta < 0 {
            // Leave the row alone rather than go below zero.
            update = update.filter(post::Column::LikeCount.gte(-delta));
        }
        update.exec(&self.db).await.map_err(repo_error)?;

        let model = PostEntity::find_by_id(post_id)
            .one(&self.db)
            .await
            .map_err(repo_error)?
            .ok_or(RepoError::NotFound)?;

        Ok(model.into())
    }
}
