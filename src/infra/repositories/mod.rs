//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod base;
mod dicom_repository;
pub mod entities;
mod role_repository;
mod user_repository;

pub use base::{ReadRepository, WriteRepository};
pub use dicom_repository::{DicomSeriesRepository, DicomSeriesStore};
pub use role_repository::{RoleRepository, RoleStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use role_repository::find_or_create as find_or_create_role;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use dicom_repository::MockDicomSeriesRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use role_repository::MockRoleRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
