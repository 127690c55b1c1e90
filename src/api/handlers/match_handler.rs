//! Match handlers: creation, search and organizer maintenance.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{MatchChanges, MatchResponse};
use crate::errors::AppResult;
use crate::services::{CreateMatch, MatchSearch};
use crate::types::{NoContent, Paginated, PaginationParams};

/// Match creation request. Player bounds default to the sport's values.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMatchRequest {
    pub sport_id: i32,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: f64,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    #[schema(value_type = f64, example = 2.5)]
    pub price: Decimal,
    /// Duration in minutes
    #[validate(range(min = 1, message = "Duration must be positive"))]
    #[schema(example = 90)]
    pub duration_minutes: i32,
    pub scheduled_at: DateTime<Utc>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 5, message = "Level must be between 0 and 5"))]
    #[schema(minimum = 0, maximum = 5)]
    pub recommended_level: i16,
}

/// Match update request. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMatchRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: Option<f64>,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    #[schema(minimum = 0, maximum = 5)]
    pub recommended_level: Option<i16>,
}

/// Match search query
#[derive(Debug, Deserialize)]
pub struct MatchSearchQuery {
    pub sport_id: Option<i32>,
    /// Only matches within this many days from now
    pub within_days: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Only matches whose recommended level is at most this
    pub max_level: Option<i16>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Create match routes (all require authentication)
pub fn match_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search_matches).post(create_match))
        .route(
            "/:id",
            get(get_match).put(update_match).delete(delete_match),
        )
}

/// Create a match
#[utoipa::path(
    post,
    path = "/matches",
    tag = "Matches",
    security(("bearer_auth" = [])),
    request_body = CreateMatchRequest,
    responses(
        (status = 201, description = "Match created", body = MatchResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_match(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateMatchRequest>,
) -> AppResult<(StatusCode, Json<MatchResponse>)> {
    let created = state
        .match_service
        .create(
            current_user.id,
            CreateMatch {
                sport_id: payload.sport_id,
                latitude: payload.latitude,
                longitude: payload.longitude,
                min_players: payload.min_players,
                max_players: payload.max_players,
                price: payload.price,
                duration_minutes: payload.duration_minutes,
                scheduled_at: payload.scheduled_at,
                description: payload.description,
                recommended_level: payload.recommended_level,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MatchResponse::from(created))))
}

/// Search upcoming matches
#[utoipa::path(
    get,
    path = "/matches",
    tag = "Matches",
    security(("bearer_auth" = [])),
    params(
        ("sport_id" = Option<i32>, Query, description = "Filter by sport"),
        ("within_days" = Option<i64>, Query, description = "Only matches within this many days"),
        ("from" = Option<String>, Query, description = "Earliest schedule (RFC 3339)"),
        ("to" = Option<String>, Query, description = "Latest schedule (RFC 3339)"),
        ("max_level" = Option<i16>, Query, description = "Maximum recommended level"),
        ("page" = Option<u64>, Query, description = "Page number (1-based)"),
        ("per_page" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Paginated match list")
    )
)]
pub async fn search_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchSearchQuery>,
) -> AppResult<Json<Paginated<MatchResponse>>> {
    let params = PaginationParams::new(query.page, query.per_page);
    let (matches, total) = state
        .match_service
        .search(
            MatchSearch {
                sport_id: query.sport_id,
                within_days: query.within_days,
                from: query.from,
                to: query.to,
                max_level: query.max_level,
            },
            &params,
        )
        .await?;

    let data = matches.into_iter().map(MatchResponse::from).collect();
    Ok(Json(Paginated::new(data, &params, total)))
}

/// Get one match with its participant count
#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "Matches",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Match identifier")),
    responses(
        (status = 200, description = "Match detail", body = MatchResponse),
        (status = 404, description = "Match not found")
    )
)]
pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MatchResponse>> {
    let (m, participant_count) = state.match_service.get(id).await?;
    Ok(Json(MatchResponse::from(m).with_participants(participant_count)))
}

/// Update a match (organizer only)
#[utoipa::path(
    put,
    path = "/matches/{id}",
    tag = "Matches",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Match identifier")),
    request_body = UpdateMatchRequest,
    responses(
        (status = 200, description = "Updated match", body = MatchResponse),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Match not found")
    )
)]
pub async fn update_match(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateMatchRequest>,
) -> AppResult<Json<MatchResponse>> {
    let updated = state
        .match_service
        .update(
            current_user.id,
            id,
            MatchChanges {
                latitude: payload.latitude,
                longitude: payload.longitude,
                min_players: payload.min_players,
                max_players: payload.max_players,
                price: payload.price,
                duration_minutes: payload.duration_minutes,
                scheduled_at: payload.scheduled_at,
                description: payload.description,
                recommended_level: payload.recommended_level,
            },
        )
        .await?;

    Ok(Json(MatchResponse::from(updated)))
}

/// Delete a match (organizer only)
#[utoipa::path(
    delete,
    path = "/matches/{id}",
    tag = "Matches",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Match identifier")),
    responses(
        (status = 204, description = "Match deleted"),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Match not found")
    )
)]
pub async fn delete_match(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.match_service.delete(current_user.id, id).await?;
    Ok(NoContent)
}
