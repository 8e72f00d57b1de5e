//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default access token lifetime in minutes
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// Longest accepted access token lifetime (one year) in minutes
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 365 * 24 * 60;

/// Default JWT signing algorithm
pub const DEFAULT_TOKEN_ALGORITHM: &str = "HS256";

/// Minimum secret key length (security requirement)
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// OAuth2 token type returned by the token endpoint
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Plain text hashed once at startup and verified against when a login
/// names an unknown user, so both failure paths cost one argon2 run.
pub const TIMING_GUARD_PASSWORD: &str = "timing-guard-password";

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// User Status
// =============================================================================

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_DEACTIVATE: &str = "deactivate";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default settings file (YAML, non-secret metadata)
pub const DEFAULT_SETTINGS_PATH: &str = "settings.yaml";

/// Default application title shown in the API docs
pub const DEFAULT_APP_TITLE: &str = "User Management";

/// Default application description shown in the API docs
pub const DEFAULT_APP_DESCRIPTION: &str = "User accounts, roles and JWT authentication";

/// Default path of the interactive API documentation
pub const DEFAULT_DOCS_URL: &str = "/docs";

/// Default path of the ReDoc API reference
pub const DEFAULT_REDOC_URL: &str = "/redoc";

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./user_management.db?mode=rwc";

/// Upper bound on pooled connections
pub const DB_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// DICOM
// =============================================================================

/// Multipart field carrying the uploaded DICOM file
pub const DICOM_UPLOAD_FIELD: &str = "file";

/// Maximum accepted upload body size (64 MiB)
pub const MAX_DICOM_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Minimum full name length requirement
pub const MIN_FULLNAME_LENGTH: u64 = 1;
