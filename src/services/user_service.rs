//! User service - Account use cases.
//!
//! Orchestrates domain validation and persistence via Unit of Work.
//! Account creation runs in one transaction so a user never exists
//! without its role links.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::AdminCredentials;
use crate::domain::{
    validate_fullname, validate_username, CreateUser, NewUser, Password, RoleName, User,
    UserStatus,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account with its roles
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Change account status
    async fn update_status(&self, id: i32, status: UserStatus) -> AppResult<User>;

    /// Replace the caller's password
    async fn change_password(
        &self,
        user: &User,
        new_password: String,
        confirmation: String,
    ) -> AppResult<()>;

    /// Make sure the role catalogue and the administrator account exist
    async fn bootstrap(&self, admin: Option<&AdminCredentials>) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        validate_username(&input.username)?;
        validate_fullname(&input.fullname)?;

        let mut roles = input.roles;
        roles.sort();
        roles.dedup();

        let new_user = NewUser {
            fullname: input.fullname,
            username: input.username,
            password_hash: Password::new(&input.password)?.into_string(),
            phone_number: input.phone_number,
            status: input.status,
            roles,
        };

        let user = with_transaction!(self.uow, |ctx| {
            let users = ctx.users();
            if users.username_exists(&new_user.username).await? {
                return Err(AppError::conflict("User"));
            }
            let id = users.insert(&new_user).await?;
            users.assign_roles(id, &new_user.roles).await?;
            users.find_by_id(id).await?.ok_or_not_found()
        })?;

        tracing::info!(user_id = user.id, roles = ?user.roles, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_status(&self, id: i32, status: UserStatus) -> AppResult<User> {
        let user = self.uow.users().update_status(id, status).await?;
        tracing::info!(user_id = id, %status, "User status changed");
        Ok(user)
    }

    async fn change_password(
        &self,
        user: &User,
        new_password: String,
        confirmation: String,
    ) -> AppResult<()> {
        if new_password != confirmation {
            return Err(AppError::validation("Passwords do not match"));
        }

        let password_hash = Password::new(&new_password)?.into_string();
        self.uow
            .users()
            .update_password(user.id, password_hash)
            .await?;

        tracing::info!(user_id = user.id, "Password changed");
        Ok(())
    }

    async fn bootstrap(&self, admin: Option<&AdminCredentials>) -> AppResult<()> {
        self.uow.roles().ensure_all().await?;

        let Some(admin) = admin else {
            tracing::warn!("ADMIN_FULLNAME, ADMIN_EMAIL or ADMIN_PASSWORD not set; skipping administrator bootstrap");
            return Ok(());
        };

        if self
            .uow
            .users()
            .find_by_username(&admin.email)
            .await?
            .is_some()
        {
            tracing::debug!("Administrator account already present");
            return Ok(());
        }

        self.create_user(CreateUser {
            fullname: admin.fullname.clone(),
            username: admin.email.clone(),
            password: admin.password().to_string(),
            phone_number: None,
            status: UserStatus::Active,
            roles: vec![RoleName::Admin],
        })
        .await?;

        tracing::info!("Administrator account created");
        Ok(())
    }
}
