//! Authentication service - Credential checks and access tokens.
//!
//! Passwords are verified through the domain `Password` value object.
//! Tokens carry the username as subject and are signed with the
//! configured HMAC algorithm.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_MINUTE, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the token holder
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "bearer")
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 1800)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue an access token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify signature and expiry, returning the claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve a bearer token to an active user
    async fn authenticate(&self, token: &str) -> AppResult<User>;
}

fn generate_token(subject: &str, now: DateTime<Utc>, config: &Config) -> AppResult<TokenResponse> {
    let lifetime = config.access_token_expire_minutes;
    let out_of_range =
        || AppError::internal(format!("Token lifetime out of range: {} minutes", lifetime));

    let expires_at = TimeDelta::try_minutes(lifetime)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(out_of_range)?;
    let expires_in = lifetime
        .checked_mul(SECONDS_PER_MINUTE)
        .ok_or_else(out_of_range)?;

    let claims = Claims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret_key_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let mut validation = Validation::new(config.algorithm);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        // Unknown usernames still pay for one hash verification.
        let user = match self.uow.users().find_by_username(&username).await? {
            Some(user) => user,
            None => {
                Password::verify_timing_guard(&password);
                return Err(AppError::InvalidCredentials);
            }
        };

        if !Password::from_hash(user.password_hash.clone()).verify(&password) {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active() {
            tracing::info!(user_id = user.id, status = %user.status, "Login refused for inactive account");
            return Err(AppError::InactiveAccount);
        }

        let now = Utc::now();
        self.uow.users().record_login(user.id, now).await?;
        tracing::info!(user_id = user.id, "User logged in");

        generate_token(&user.username, now, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.verify_token(token)?;

        let user = self
            .uow
            .users()
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.is_active() {
            return Err(AppError::InactiveAccount);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoleName, UserStatus};
    use crate::infra::{
        DicomSeriesRepository, MockDicomSeriesRepository, MockRoleRepository,
        MockUserRepository, RoleRepository, TransactionContext, UserRepository,
    };

    const SECRET: &str = "unit-test-secret-key-that-is-long-enough";

    struct TestUnitOfWork {
        users: Arc<MockUserRepository>,
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn roles(&self) -> Arc<dyn RoleRepository> {
            Arc::new(MockRoleRepository::new())
        }

        fn dicom_series(&self) -> Arc<dyn DicomSeriesRepository> {
            Arc::new(MockDicomSeriesRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(
                    TransactionContext<'a>,
                ) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("transactions are not available here"))
        }
    }

    fn config() -> Config {
        Config::with_secret(SECRET, "sqlite::memory:")
    }

    fn user_with(password: &str, status: UserStatus) -> User {
        User {
            id: 7,
            fullname: "Jane Doe".to_string(),
            username: "jane@example.com".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            phone_number: None,
            created_at: Utc::now(),
            status,
            last_login: None,
            roles: vec![RoleName::User],
        }
    }

    fn service(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            users: Arc::new(users),
        };
        Authenticator::new(Arc::new(uow), config())
    }

    #[tokio::test]
    async fn test_login_issues_token_and_records_login() {
        let user = user_with("correct-horse", UserStatus::Active);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        users
            .expect_record_login()
            .times(1)
            .returning(|_, _| Ok(()));

        let auth = service(users);
        let token = auth
            .login("jane@example.com".to_string(), "correct-horse".to_string())
            .await
            .unwrap();

        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 30 * 60);

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, "jane@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let user = user_with("correct-horse", UserStatus::Active);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |username| {
                if username == "jane@example.com" {
                    Ok(Some(user.clone()))
                } else {
                    Ok(None)
                }
            });
        users.expect_record_login().never();

        let auth = service(users);
        let wrong = auth
            .login("jane@example.com".to_string(), "battery-staple".to_string())
            .await
            .unwrap_err();
        let unknown = auth
            .login("nobody@example.com".to_string(), "battery-staple".to_string())
            .await
            .unwrap_err();

        assert!(matches!(wrong, AppError::InvalidCredentials));
        assert!(matches!(unknown, AppError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_inactive_account_cannot_log_in() {
        let user = user_with("correct-horse", UserStatus::Pending);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        users.expect_record_login().never();

        let err = service(users)
            .login("jane@example.com".to_string(), "correct-horse".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InactiveAccount));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let auth = service(MockUserRepository::new());
        let jane = generate_token("jane@example.com", Utc::now(), &config())
            .unwrap()
            .access_token;
        let admin = generate_token("admin@example.com", Utc::now(), &config())
            .unwrap()
            .access_token;

        // admin's payload under jane's signature
        let jane_parts: Vec<&str> = jane.split('.').collect();
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let tampered = format!("{}.{}.{}", jane_parts[0], admin_parts[1], jane_parts[2]);

        assert!(auth.verify_token(&tampered).is_err());
        assert!(auth.verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let auth = service(MockUserRepository::new());
        let other = Config::with_secret("another-secret-key-of-sufficient-size", "sqlite::memory:");
        let token = generate_token("jane@example.com", Utc::now(), &other)
            .unwrap()
            .access_token;

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = service(MockUserRepository::new());
        let issued = Utc::now() - TimeDelta::hours(2);
        let token = generate_token("jane@example.com", issued, &config())
            .unwrap()
            .access_token;

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_oversized_lifetime_is_an_error_not_a_panic() {
        let mut config = config();
        config.access_token_expire_minutes = 200_000_000_000;
        let err = generate_token("jane@example.com", Utc::now(), &config).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        config.access_token_expire_minutes = i64::MAX;
        assert!(generate_token("jane@example.com", Utc::now(), &config).is_err());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_deactivated_user() {
        let user = user_with("correct-horse", UserStatus::Deactivate);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = service(users);
        let token = generate_token("jane@example.com", Utc::now(), &config())
            .unwrap()
            .access_token;

        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AppError::InactiveAccount));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_unknown_subject() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let auth = service(users);
        let token = generate_token("ghost@example.com", Utc::now(), &config())
            .unwrap()
            .access_token;

        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
