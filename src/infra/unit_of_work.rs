//! Unit of Work pattern implementation.
//!
//! Centralizes access to the repositories and runs multi-statement writes
//! inside one database transaction, committed on success and rolled back
//! on error.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::{user, user_role, RoleEntity, UserActiveModel, UserEntity};
use super::repositories::{
    find_or_create_role, DicomSeriesRepository, DicomSeriesStore, RoleRepository, RoleStore,
    UserRepository, UserStore,
};
use crate::domain::{NewUser, RoleName, User};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction method.
/// For testing, mock at the repository level or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get role repository
    fn roles(&self) -> Arc<dyn RoleRepository>;

    /// Get DICOM series repository
    fn dicom_series(&self) -> Arc<dyn DicomSeriesRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access bound to an open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    role_repo: Arc<RoleStore>,
    dicom_repo: Arc<DicomSeriesStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            role_repo: Arc::new(RoleStore::new(db.clone())),
            dicom_repo: Arc::new(DicomSeriesStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.role_repo.clone()
    }

    fn dicom_series(&self) -> Arc<dyn DicomSeriesRepository> {
        self.dicom_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find user by ID, with roles
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let mut rows = UserEntity::find_by_id(id)
            .find_with_related(RoleEntity)
            .all(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(rows.pop().map(|(model, roles)| model.into_user(roles)))
    }

    /// Whether a username is taken
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let found = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(found.is_some())
    }

    /// Insert the account row and return its ID. Roles are linked separately
    /// with [`TxUserRepository::assign_roles`].
    pub async fn insert(&self, new_user: &NewUser) -> AppResult<i32> {
        new_user.validate()?;

        let active_model = UserActiveModel {
            fullname: Set(new_user.fullname.clone()),
            username: Set(new_user.username.clone()),
            password: Set(new_user.password_hash.clone()),
            phone_number: Set(new_user.phone_number),
            created_at: Set(chrono::Utc::now()),
            status: Set(new_user.status.as_str().to_string()),
            last_login: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("User"),
                _ => AppError::from(e),
            }
        })?;

        Ok(model.id)
    }

    /// Link a user to each role, creating missing role rows.
    pub async fn assign_roles(&self, user_id: i32, roles: &[RoleName]) -> AppResult<()> {
        for name in roles {
            let role = find_or_create_role(self.txn, *name).await?;

            let link = user_role::ActiveModel {
                user_id: Set(user_id),
                role_id: Set(role.id),
            };
            user_role::Entity::insert(link)
                .exec_without_returning(self.txn)
                .await
                .map_err(AppError::from)?;
        }
        Ok(())
    }
}

/// Run a transactional block with less ceremony.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
