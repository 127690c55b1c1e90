//! Authentication service.
//!
//! Issues and verifies bearer tokens, and keeps a Redis denylist of
//! revoked token identifiers so logout takes effect immediately.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{NewUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, UnitOfWork};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    /// Token identifier, used for revocation on logout
    pub jti: String,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Validated registration data, ready for account creation
#[derive(Debug, Clone)]
pub struct Registration {
    pub city_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub birthdate: NaiveDate,
}

/// Store of revoked token identifiers. Backed by Redis in production;
/// anything implementing it can stand in for tests.
#[async_trait]
pub trait TokenDenylist: Send + Sync {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> AppResult<()>;
    async fn is_revoked(&self, jti: &str) -> AppResult<bool>;
}

#[async_trait]
impl TokenDenylist for Cache {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> AppResult<()> {
        self.revoke_token(jti, ttl_seconds).await
    }

    async fn is_revoked(&self, jti: &str) -> AppResult<bool> {
        self.is_token_revoked(jti).await
    }
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and log them in
    async fn register(&self, data: Registration) -> AppResult<(User, TokenResponse)>;

    /// Login and return a bearer token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Revoke the given token so it can no longer be used
    async fn logout(&self, token: &str) -> AppResult<()>;

    /// Verify a bearer token and return its claims, rejecting revoked tokens
    async fn authenticate(&self, token: &str) -> AppResult<Claims>;

    /// Check whether an email address is already registered
    async fn check_email(&self, email: &str) -> AppResult<bool>;

    /// Permanently delete the user's account
    async fn delete_account(&self, user_id: Uuid) -> AppResult<()>;
}

/// Generate a bearer token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Decode and verify a token's signature and expiry (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    denylist: Arc<dyn TokenDenylist>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, denylist: Arc<dyn TokenDenylist>, config: Config) -> Self {
        Self {
            uow,
            denylist,
            config,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, data: Registration) -> AppResult<(User, TokenResponse)> {
        // Emails are stored lowercase so lookups are case-insensitive
        let email = data.email.trim().to_lowercase();

        if self.uow.users().email_exists(&email).await? {
            return Err(AppError::invalid_request(
                "An account with this email already exists.",
            ));
        }

        if self.uow.catalog().find_city(data.city_id).await?.is_none() {
            return Err(AppError::invalid_request("Unknown city."));
        }

        let password_hash = Password::new(&data.password)?.into();

        let user = self
            .uow
            .users()
            .create(NewUser {
                city_id: data.city_id,
                first_name: data.first_name,
                last_name: data.last_name,
                email,
                phone_number: data.phone_number,
                password_hash,
                birthdate: data.birthdate,
            })
            .await?;

        let token = generate_token(&user, &self.config)?;
        tracing::info!(user_id = %user.id, "New account registered");

        Ok((user, token))
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let email = email.trim().to_lowercase();
        let user_result = self.uow.users().find_by_email(&email).await?;

        // SECURITY: always run a password verification, even when the email
        // is unknown, so response timing does not leak valid addresses.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidGrant);
        }

        // Safe to unwrap since we verified user_exists is true
        generate_token(user_result.as_ref().unwrap(), &self.config)
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        let claims = verify_token_internal(token, &self.config)?;

        // Keep the denylist entry only as long as the token would stay valid
        let remaining = (claims.exp - Utc::now().timestamp()).max(1) as u64;
        self.denylist.revoke(&claims.jti, remaining).await?;

        Ok(())
    }

    async fn authenticate(&self, token: &str) -> AppResult<Claims> {
        let claims = verify_token_internal(token, &self.config)?;

        if self.denylist.is_revoked(&claims.jti).await? {
            return Err(AppError::InvalidGrant);
        }

        Ok(claims)
    }

    async fn check_email(&self, email: &str) -> AppResult<bool> {
        self.uow.users().email_exists(&email.trim().to_lowercase()).await
    }

    async fn delete_account(&self, user_id: Uuid) -> AppResult<()> {
        self.uow.users().delete(user_id).await?;
        tracing::info!(user_id = %user_id, "Account deleted");
        Ok(())
    }
}
