//! Team handlers: organizer-managed team composition.

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
use crate::domain::{Team, TeamRoster};
use crate::errors::AppResult;
use crate::types::NoContent;

/// Team creation or rename request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TeamNameRequest {
    #[validate(length(min = 1, message = "Team name is required"))]
    #[schema(example = "Les Rouges")]
    pub name: String,
}

/// Match-scoped team routes, nested under /matches
pub fn match_team_routes() -> Router<AppState> {
    Router::new().route("/:id/teams", get(list_teams).post(create_team))
}

/// Team-scoped routes, nested under /teams
pub fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", put(rename_team).delete(delete_team))
        .route(
            "/:id/members/:user_id",
            put(assign_member).delete(unassign_member),
        )
}

/// List a match's teams with their members
#[utoipa::path(
    get,
    path = "/matches/{id}/teams",
    tag = "Teams",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Match identifier")),
    responses(
        (status = 200, description = "Team list", body = [TeamRoster]),
        (status = 404, description = "Match not found")
    )
)]
pub async fn list_teams(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<TeamRoster>>> {
    let teams = state.team_service.list(id).await?;
    Ok(Json(teams))
}

/// Create a team (organizer only)
#[utoipa::path(
    post,
    path = "/matches/{id}/teams",
    tag = "Teams",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Match identifier")),
    request_body = TeamNameRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Name already taken"),
        (status = 403, description = "Not the organizer")
    )
)]
pub async fn create_team(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<TeamNameRequest>,
) -> AppResult<(StatusCode, Json<Team>)> {
    let team = state
        .team_service
        .create(current_user.id, id, payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// Rename a team (organizer only)
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "Teams",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Team identifier")),
    request_body = TeamNameRequest,
    responses(
        (status = 200, description = "Team renamed", body = Team),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Team not found")
    )
)]
pub async fn rename_team(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<TeamNameRequest>,
) -> AppResult<Json<Team>> {
    let team = state
        .team_service
        .rename(current_user.id, id, payload.name)
        .await?;

    Ok(Json(team))
}

/// Delete a team (organizer only)
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "Teams",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Team identifier")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Team not found")
    )
)]
pub async fn delete_team(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.team_service.delete(current_user.id, id).await?;
    Ok(NoContent)
}

/// Put a participant into the team (organizer only)
#[utoipa::path(
    put,
    path = "/teams/{id}/members/{user_id}",
    tag = "Teams",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Team identifier"),
        ("user_id" = Uuid, Path, description = "User identifier")
    ),
    responses(
        (status = 204, description = "Member assigned"),
        (status = 400, description = "User does not participate in the match"),
        (status = 403, description = "Not the organizer")
    )
)]
pub async fn assign_member(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<NoContent> {
    state.team_service.assign(current_user.id, id, user_id).await?;
    Ok(NoContent)
}

/// Remove a participant from the team (organizer only)
#[utoipa::path(
    delete,
    path = "/teams/{id}/members/{user_id}",
    tag = "Teams",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Team identifier"),
        ("user_id" = Uuid, Path, description = "User identifier")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Team or participation not found")
    )
)]
pub async fn unassign_member(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<NoContent> {
    state
        .team_service
        .unassign(current_user.id, id, user_id)
        .await?;

    Ok(NoContent)
}
