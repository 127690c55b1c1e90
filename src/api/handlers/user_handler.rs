//! User handlers: own profile, public profiles and skill levels.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{PublicProfile, SkillLevel, UpdateProfile, UserResponse};
use crate::errors::AppResult;
use crate::types::NoContent;

/// Profile update request. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture_url: Option<String>,
    pub city_id: Option<i32>,
}

/// Skill level declaration
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetLevelRequest {
    #[validate(range(min = 0, max = 5, message = "Level must be between 0 and 5"))]
    #[schema(minimum = 0, maximum = 5)]
    pub level: i16,
    pub description: Option<String>,
}

/// Create user routes (all require authentication)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me).delete(delete_me))
        .route("/me/levels", get(my_levels))
        .route("/me/levels/:sport_id", put(set_level))
        .route("/:id", get(get_user))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile", body = UserResponse),
        (status = 400, description = "Invalid or revoked token")
    )
)]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_profile(
            current_user.id,
            UpdateProfile {
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone_number: payload.phone_number,
                profile_picture_url: payload.profile_picture_url,
                city_id: payload.city_id,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete the authenticated user's account
#[utoipa::path(
    delete,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<NoContent> {
    state.auth_service.delete_account(current_user.id).await?;
    Ok(NoContent)
}

/// List the authenticated user's skill levels
#[utoipa::path(
    get,
    path = "/users/me/levels",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Declared levels", body = [SkillLevel])
    )
)]
pub async fn my_levels(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<SkillLevel>>> {
    let levels = state.user_service.levels(current_user.id).await?;
    Ok(Json(levels))
}

/// Declare or update the level for one sport
#[utoipa::path(
    put,
    path = "/users/me/levels/{sport_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("sport_id" = i32, Path, description = "Sport identifier")),
    request_body = SetLevelRequest,
    responses(
        (status = 200, description = "Level saved", body = SkillLevel),
        (status = 404, description = "Unknown sport")
    )
)]
pub async fn set_level(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(sport_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SetLevelRequest>,
) -> AppResult<Json<SkillLevel>> {
    let level = state
        .user_service
        .set_level(current_user.id, sport_id, payload.level, payload.description)
        .await?;

    Ok(Json(level))
}

/// Get another user's public profile
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Public profile", body = PublicProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PublicProfile>> {
    let user = state.user_service.get(id).await?;
    Ok(Json(PublicProfile::from(user)))
}
