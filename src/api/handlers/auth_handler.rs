//! Authentication handlers.

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::services::{Registration, TokenResponse};
use crate::types::MessageResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Home city identifier
    pub city_id: i32,
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Jeanne")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Martin")]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jeanne.martin@example.com")]
    pub email: String,
    #[schema(example = "+33612345678")]
    pub phone_number: Option<String>,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    pub birthdate: NaiveDate,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jeanne.martin@example.com")]
    pub email: String,
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Registration response: the new account plus a ready-to-use token
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub token: TokenResponse,
}

/// Email availability query
#[derive(Debug, Deserialize)]
pub struct CheckEmailQuery {
    pub email: String,
}

/// Email availability response
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/check-email", get(check_email))
}

/// Register a new account and log in
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation error or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let (user, token) = state
        .auth_service
        .register(Registration {
            city_id: payload.city_id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone_number: payload.phone_number,
            password: payload.password,
            birthdate: payload.birthdate,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserResponse::from(user),
            token,
        }),
    ))
}

/// Login and get a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Revoke the presented bearer token
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 400, description = "Missing or invalid Authorization header")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<MessageResponse>> {
    // This route sits outside the auth middleware so that a token can be
    // revoked even if some other check would reject the request.
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::InvalidHeader)?;

    state.auth_service.logout(token).await?;

    Ok(Json(MessageResponse::new("Logged out.")))
}

/// Check whether an email address is already registered
#[utoipa::path(
    get,
    path = "/auth/check-email",
    tag = "Authentication",
    params(("email" = String, Query, description = "Email address to check")),
    responses(
        (status = 200, description = "Availability", body = CheckEmailResponse)
    )
)]
pub async fn check_email(
    State(state): State<AppState>,
    Query(query): Query<CheckEmailQuery>,
) -> AppResult<Json<CheckEmailResponse>> {
    if query.email.trim().is_empty() {
        return Err(AppError::invalid_request("Email is required."));
    }

    let exists = state.auth_service.check_email(query.email.trim()).await?;
    Ok(Json(CheckEmailResponse { exists }))
}
