//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories over SeaORM entities
//! - Unit of Work for transaction management
//! - DICOM file reading

pub mod db;
pub mod dicom;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use dicom::read_series_metadata;
pub use repositories::{
    DicomSeriesRepository, DicomSeriesStore, RoleRepository, RoleStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, TxUserRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockDicomSeriesRepository, MockRoleRepository, MockUserRepository};
