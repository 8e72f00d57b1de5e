//! Application configuration module
//!
//! Handles environment variables, the YAML settings file and
//! application-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::{AdminCredentials, Config};
