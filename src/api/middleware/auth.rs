//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated user extracted from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

/// Authentication middleware.
///
/// A missing or malformed Authorization header is an `invalid_header`
/// error; a bad, expired or revoked token is `invalid_grant`. The
/// resolved CurrentUser is injected into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidHeader)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::InvalidHeader)?;

    let claims = state.auth_service.authenticate(token).await?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
