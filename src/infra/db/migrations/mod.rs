//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20241120_000001_create_user_account_table;
mod m20241120_000002_create_role_tables;
mod m20241208_000001_add_last_login_to_user_account;
mod m20241210_000001_create_dicom_series_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241120_000001_create_user_account_table::Migration),
            Box::new(m20241120_000002_create_role_tables::Migration),
            Box::new(m20241208_000001_add_last_login_to_user_account::Migration),
            Box::new(m20241210_000001_create_dicom_series_table::Migration),
        ]
    }
}
