//! Participation handlers: rosters, joining, validation and scoring.

use axum::{
    extract::{Path, State},
    http::StatusCode,
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
use crate::domain::Participation;
use crate::errors::AppResult;
use crate::types::NoContent;

/// Attendance confirmation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ValidateRequest {
    pub validated: bool,
}

/// Match scoring request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ScoreRequest {
    #[validate(range(min = 0, max = 5, message = "Score must be between 0 and 5"))]
    #[schema(minimum = 0, maximum = 5)]
    pub score: i16,
}

/// Create participation routes, nested under /matches
pub fn participation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:id/participations",
            get(roster).post(join).delete(leave),
        )
        .route("/:id/participations/score", put(score))
        .route("/:id/participations/:user_id/validate", put(validate))
}

/// List a match's participants
#[utoipa::path(
    get,
    path = "/matches/{id}/participations",
    tag = "Participations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Match identifier")),
    responses(
        (status = 200, description = "Participant list", body = [Participation]),
        (status = 404, description = "Match not found")
    )
)]
pub async fn roster(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Participation>>> {
    let roster = state.participation_service.roster(id).await?;
    Ok(Json(roster))
}

/// Join a match
#[utoipa::path(
    post,
    path = "/matches/{id}/participations",
    tag = "Participations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Match identifier")),
    responses(
        (status = 201, description = "Joined", body = Participation),
        (status = 400, description = "Match full, started, or already joined"),
        (status = 404, description = "Match not found")
    )
)]
pub async fn join(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<Participation>)> {
    let participation = state.participation_service.join(current_user.id, id).await?;
    Ok((StatusCode::CREATED, Json(participation)))
}

/// Leave a match
#[utoipa::path(
    delete,
    path = "/matches/{id}/participations",
    tag = "Participations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Match identifier")),
    responses(
        (status = 204, description = "Left the match"),
        (status = 404, description = "Not participating")
    )
)]
pub async fn leave(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.participation_service.leave(current_user.id, id).await?;
    Ok(NoContent)
}

/// Confirm or revoke a participant's attendance (organizer only)
#[utoipa::path(
    put,
    path = "/matches/{id}/participations/{user_id}/validate",
    tag = "Participations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Match identifier"),
        ("user_id" = Uuid, Path, description = "Participant user identifier")
    ),
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "Attendance updated", body = Participation),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Match or participation not found")
    )
)]
pub async fn validate(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<ValidateRequest>,
) -> AppResult<Json<Participation>> {
    let participation = state
        .participation_service
        .validate(current_user.id, id, user_id, payload.validated)
        .await?;

    Ok(Json(participation))
}

/// Record the caller's score for a validated participation
#[utoipa::path(
    put,
    path = "/matches/{id}/participations/score",
    tag = "Participations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Match identifier")),
    request_body = ScoreRequest,
    responses(
        (status = 200, description = "Score saved", body = Participation),
        (status = 400, description = "Participation not validated yet"),
        (status = 404, description = "Not participating")
    )
)]
pub async fn score(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ScoreRequest>,
) -> AppResult<Json<Participation>> {
    let participation = state
        .participation_service
        .score(current_user.id, id, payload.score)
        .await?;

    Ok(Json(participation))
}
