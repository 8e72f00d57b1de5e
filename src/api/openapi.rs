//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI; title, description and version are
//! replaced from the loaded settings when the router is built.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, dicom_handler, profile_handler, user_handler};
use crate::config::Config;
use crate::domain::{DicomSeries, RoleName, RoleView, UserDetail, UserProfile, UserStatus};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        version = "0.1.0",
        description = "User accounts, token authentication and DICOM series metadata",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        auth_handler::login,
        profile_handler::get_profile,
        profile_handler::change_password,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_status,
        dicom_handler::upload,
    ),
    components(
        schemas(
            RoleName,
            RoleView,
            UserStatus,
            UserProfile,
            UserDetail,
            DicomSeries,
            TokenResponse,
            MessageResponse,
            auth_handler::LoginForm,
            profile_handler::ChangePasswordRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateStatusRequest,
            dicom_handler::UploadForm,
            dicom_handler::UploadResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance"),
        (name = "Profile", description = "The caller's own account"),
        (name = "Users", description = "Account administration"),
        (name = "DICOM", description = "DICOM series metadata ingest")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Document with the configured title, description and version.
    pub fn for_config(config: &Config) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        doc.info.title = config.title.clone();
        doc.info.description = Some(config.description.clone());
        doc.info.version = config.version.clone();
        doc
    }
}

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token obtained from /auth/token"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_uses_configured_title() {
        let mut config = Config::with_secret("x".repeat(32), "sqlite::memory:");
        config.title = "Imaging Accounts".to_string();

        let doc = ApiDoc::for_config(&config);
        assert_eq!(doc.info.title, "Imaging Accounts");
        assert!(doc.paths.paths.contains_key("/auth/token"));
        assert!(doc.paths.paths.contains_key("/dicom/upload"));
    }
}
