//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::RoleName;
use crate::config::{STATUS_ACTIVE, STATUS_DEACTIVATE, STATUS_PENDING};
use crate::errors::{AppError, AppResult};

/// Account status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    #[default]
    Pending,
    Deactivate,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => STATUS_ACTIVE,
            UserStatus::Pending => STATUS_PENDING,
            UserStatus::Deactivate => STATUS_DEACTIVATE,
        }
    }
}

/// Stored values outside the known set are read as `Deactivate`,
/// so an unexpected row can never authenticate.
impl From<&str> for UserStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_ACTIVE => UserStatus::Active,
            STATUS_PENDING => UserStatus::Pending,
            _ => UserStatus::Deactivate,
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub fullname: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone_number: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub status: UserStatus,
    pub last_login: Option<DateTime<Utc>>,
    pub roles: Vec<RoleName>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(RoleName::is_admin)
    }
}

/// Username rule: non-empty and contains `@`.
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.is_empty() {
        return Err(AppError::validation("username must be set!"));
    }
    if !username.contains('@') {
        return Err(AppError::validation("Failed simple email validation"));
    }
    Ok(())
}

/// Full name rule: non-empty.
pub fn validate_fullname(fullname: &str) -> AppResult<()> {
    if fullname.is_empty() {
        return Err(AppError::validation("fullname must be set!"));
    }
    Ok(())
}

/// Account creation data transfer object. The password is plain text.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub fullname: String,
    pub username: String,
    pub password: String,
    pub phone_number: Option<i64>,
    pub status: UserStatus,
    pub roles: Vec<RoleName>,
}

/// Data needed to persist a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub fullname: String,
    pub username: String,
    pub password_hash: String,
    pub phone_number: Option<i64>,
    pub status: UserStatus,
    pub roles: Vec<RoleName>,
}

impl NewUser {
    /// Check the model-level invariants before anything touches storage.
    pub fn validate(&self) -> AppResult<()> {
        validate_username(&self.username)?;
        validate_fullname(&self.fullname)
    }
}

/// Role as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleView {
    #[schema(example = "admin")]
    pub name: RoleName,
}

/// Sanitized account view (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    #[schema(example = "Jane Doe")]
    pub fullname: String,
    #[schema(example = "jane@example.com")]
    pub username: String,
    pub status: UserStatus,
    pub roles: Vec<RoleView>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            fullname: user.fullname,
            username: user.username,
            status: user.status,
            roles: user
                .roles
                .into_iter()
                .map(|name| RoleView { name })
                .collect(),
        }
    }
}

/// Account view for administrators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDetail {
    pub id: i32,
    pub fullname: String,
    pub username: String,
    pub phone_number: Option<i64>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub roles: Vec<RoleView>,
}

impl From<User> for UserDetail {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            username: user.username,
            phone_number: user.phone_number,
            status: user.status,
            created_at: user.created_at,
            last_login: user.last_login,
            roles: user
                .roles
                .into_iter()
                .map(|name| RoleView { name })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            fullname: "Test User".to_string(),
            username: "testuser@mail.com".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            phone_number: Some(1234567890),
            created_at: Utc::now(),
            status: UserStatus::Active,
            last_login: None,
            roles: vec![RoleName::User],
        }
    }

    #[test]
    fn test_username_must_be_set() {
        let err = validate_username("").unwrap_err();
        assert_eq!(err.to_string(), "username must be set!");
    }

    #[test]
    fn test_username_must_contain_at() {
        let err = validate_username("testuser.mail.com").unwrap_err();
        assert_eq!(err.to_string(), "Failed simple email validation");
        assert!(validate_username("testuser@mail.com").is_ok());
    }

    #[test]
    fn test_fullname_must_be_set() {
        assert!(validate_fullname("").is_err());
        assert!(validate_fullname("Test User").is_ok());
    }

    #[test]
    fn test_new_user_validation_checks_both_fields() {
        let new_user = NewUser {
            fullname: String::new(),
            username: "a@b.c".to_string(),
            password_hash: "hash".to_string(),
            phone_number: None,
            status: UserStatus::default(),
            roles: vec![],
        };
        assert!(new_user.validate().is_err());
    }

    #[test]
    fn test_status_defaults_to_pending() {
        assert_eq!(UserStatus::default(), UserStatus::Pending);
    }

    #[test]
    fn test_unknown_stored_status_is_not_active() {
        assert_eq!(UserStatus::from("active"), UserStatus::Active);
        assert_eq!(UserStatus::from("banned"), UserStatus::Deactivate);
    }

    #[test]
    fn test_profile_never_contains_password() {
        let profile = UserProfile::from(sample_user());
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "fullname": "Test User",
                "username": "testuser@mail.com",
                "status": "active",
                "roles": [{ "name": "user" }],
            })
        );
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_admin_detection() {
        let mut user = sample_user();
        assert!(!user.is_admin());
        user.roles.push(RoleName::Admin);
        assert!(user.is_admin());
        assert!(user.has_role(RoleName::User));
    }
}
