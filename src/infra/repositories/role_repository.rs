//! Role repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::{role, RoleActiveModel, RoleEntity};
use crate::domain::RoleName;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Role repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Insert every [`RoleName`] that has no row yet
    async fn ensure_all(&self) -> AppResult<()>;

    /// Names of all stored roles
    async fn list(&self) -> AppResult<Vec<RoleName>>;
}

/// Concrete implementation of RoleRepository
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn ensure_all(&self) -> AppResult<()> {
        for name in RoleName::ALL {
            find_or_create(&self.db, name).await?;
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<RoleName>> {
        let models = RoleEntity::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .filter_map(|model| model.name.parse().ok())
            .collect())
    }
}

/// Look up a role row by name, inserting it when absent.
/// Works on a plain connection or inside a transaction.
pub(crate) async fn find_or_create<C>(db: &C, name: RoleName) -> AppResult<role::Model>
where
    C: ConnectionTrait,
{
    let existing = RoleEntity::find()
        .filter(role::Column::Name.eq(name.as_str()))
        .one(db)
        .await
        .map_err(AppError::from)?;

    if let Some(model) = existing {
        return Ok(model);
    }

    tracing::info!(role = %name, "Creating role");
    let model = RoleActiveModel {
        name: Set(name.as_str().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(AppError::from)?;

    Ok(model)
}
