//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedForm;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// OAuth2 password-flow login form.
///
/// Extra OAuth2 fields such as `grant_type` and `scope` are accepted
/// and ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    /// Account username (an email address)
    #[validate(email(message = "Failed simple email validation"))]
    #[schema(example = "user@example.com")]
    pub username: String,
    /// Account password
    #[validate(length(min = 1, message = "password must be set!"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(login))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Incorrect username or password, or inactive account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(form.username, form.password)
        .await?;

    Ok(Json(token))
}
