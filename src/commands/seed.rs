//! Seed command - Roles and administrator bootstrap.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{UserManager, UserService};

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;

    let users = UserManager::new(Arc::new(Persistence::new(db.get_connection())));
    users.bootstrap(config.admin.as_ref()).await?;

    tracing::info!("Seeding completed");
    Ok(())
}
