//! User Management - accounts, token authentication and DICOM metadata.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Settings (environment, `.env`, YAML) and constants
//! - **domain**: Core business entities and validation rules
//! - **services**: Application use cases
//! - **infra**: Database, migrations, repositories and the DICOM reader
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (applies migrations and bootstraps the admin)
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create roles and the administrator only
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, RoleName, User, UserStatus};
pub use errors::{AppError, AppResult};
