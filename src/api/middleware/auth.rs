//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::User;
use crate::errors::AppError;

/// Authenticated, active account resolved from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

/// Token part of an `Authorization` header value. The scheme is
/// matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let prefix_len = BEARER_TOKEN_PREFIX.len();
    let scheme = header.get(..prefix_len)?;
    if !scheme.eq_ignore_ascii_case(BEARER_TOKEN_PREFIX) {
        return None;
    }
    let token = header[prefix_len..].trim();
    (!token.is_empty()).then_some(token)
}

/// Bearer authentication middleware.
///
/// Validates the token, loads the account and injects [`CurrentUser`]
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::Unauthorized)?;

    let user = state.auth_service.authenticate(token).await?;
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
