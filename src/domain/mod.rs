//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the validation rules that hold
//! regardless of how data reaches the service.

pub mod dicom;
pub mod password;
pub mod role;
pub mod user;

pub use dicom::{DicomSeries, NewDicomSeries};
pub use password::Password;
pub use role::RoleName;
pub use user::{
    validate_fullname, validate_username, CreateUser, NewUser, RoleView, User, UserDetail, UserProfile,
    UserStatus,
};
