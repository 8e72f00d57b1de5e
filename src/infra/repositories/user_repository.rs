//! User repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use super::entities::{user, RoleEntity, UserActiveModel, UserEntity};
use crate::domain::{User, UserStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every returned [`User`] carries its roles.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by username (email)
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Stamp a successful login
    async fn record_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<()>;

    /// Change account status
    async fn update_status(&self, id: i32, status: UserStatus) -> AppResult<User>;

    /// Replace the stored password hash
    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let mut rows = UserEntity::find_by_id(id)
            .find_with_related(RoleEntity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.pop().map(|(model, roles)| model.into_user(roles)))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let mut rows = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .find_with_related(RoleEntity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.pop().map(|(model, roles)| model.into_user(roles)))
    }

    async fn record_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<()> {
        let mut active: UserActiveModel = self.find_model(id).await?.into();
        active.last_login = Set(Some(at));
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn update_status(&self, id: i32, status: UserStatus) -> AppResult<User> {
        let mut active: UserActiveModel = self.find_model(id).await?.into();
        active.status = Set(status.as_str().to_string());
        active.update(&self.db).await.map_err(AppError::from)?;

        self.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<()> {
        let mut active: UserActiveModel = self.find_model(id).await?.into();
        active.password = Set(password_hash);
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }
}

