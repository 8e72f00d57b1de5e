//! Role names.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_USER};
use crate::errors::AppError;

/// Enumerated set of roles a user may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Admin,
    User,
}

impl RoleName {
    /// Every role, in the order they are seeded.
    pub const ALL: [RoleName; 2] = [RoleName::Admin, RoleName::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => ROLE_ADMIN,
            RoleName::User => ROLE_USER,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, RoleName::Admin)
    }
}

impl std::str::FromStr for RoleName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(RoleName::Admin),
            ROLE_USER => Ok(RoleName::User),
            other => Err(AppError::validation(format!("Unknown role: {}", other))),
        }
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
