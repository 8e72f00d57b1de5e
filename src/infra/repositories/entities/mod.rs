//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod dicom_series;
pub mod role;
pub mod user;
pub mod user_role;

pub use dicom_series::{
    ActiveModel as DicomSeriesActiveModel, Entity as DicomSeriesEntity, Model as DicomSeriesModel,
};
pub use role::{ActiveModel as RoleActiveModel, Entity as RoleEntity, Model as RoleModel};
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
pub use user_role::{Entity as UserRoleEntity, Model as UserRoleModel};
