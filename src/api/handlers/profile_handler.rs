//! Handlers for the authenticated caller's own account.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::MIN_PASSWORD_LENGTH;
use crate::domain::UserProfile;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"))]
    #[schema(example = "NewSecurePass123!", min_length = 8)]
    pub new_password: String,
    #[schema(example = "NewSecurePass123!")]
    pub new_password_confirm: String,
}

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/password", put(change_password))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/user/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn get_profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserProfile> {
    Json(UserProfile::from(user))
}

/// Change the current user's password
#[utoipa::path(
    put,
    path = "/user/password",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Too short or confirmation mismatch"),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn change_password(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .user_service
        .change_password(&user, payload.new_password, payload.new_password_confirm)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully.")))
}
