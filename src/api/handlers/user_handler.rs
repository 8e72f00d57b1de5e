//! Administrator user management handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::{MIN_FULLNAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::domain::{CreateUser, RoleName, UserDetail, UserStatus};
use crate::errors::AppResult;
use crate::types::Created;

/// User creation request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = MIN_FULLNAME_LENGTH, message = "fullname must be set!"))]
    #[schema(example = "Jane Doe")]
    pub fullname: String,
    #[validate(email(message = "Failed simple email validation"))]
    #[schema(example = "jane@example.com")]
    pub username: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    pub phone_number: Option<i64>,
    /// Defaults to `pending`
    pub status: Option<UserStatus>,
    #[validate(length(min = 1, message = "At least one role is required"))]
    pub roles: Vec<RoleName>,
}

/// Status change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: UserStatus,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user))
        .route("/:id/status", patch(update_status))
}

/// Create a user account (admin only)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDetail),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserDetail>> {
    require_admin(&current_user)?;

    let user = state
        .user_service
        .create_user(CreateUser {
            fullname: payload.fullname,
            username: payload.username,
            password: payload.password,
            phone_number: payload.phone_number,
            status: payload.status.unwrap_or_default(),
            roles: payload.roles,
        })
        .await?;

    Ok(Created(UserDetail::from(user)))
}

/// Get user by ID (admin only)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDetail),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserDetail>> {
    require_admin(&current_user)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserDetail::from(user)))
}

/// Change a user's status (admin only)
#[utoipa::path(
    patch,
    path = "/users/{id}/status",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UserDetail),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> AppResult<Json<UserDetail>> {
    require_admin(&current_user)?;
    let user = state.user_service.update_status(id, payload.status).await?;
    Ok(Json(UserDetail::from(user)))
}
