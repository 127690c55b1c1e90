//! Catalog handlers: public city and sport listings.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{City, Sport};
use crate::errors::AppResult;
use crate::types::{Paginated, PaginationParams};

/// City listing query
#[derive(Debug, Deserialize)]
pub struct CitiesQuery {
    /// Filter by name or postal code prefix
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Create catalog routes (public)
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities))
        .route("/sports", get(list_sports))
}

/// List cities
#[utoipa::path(
    get,
    path = "/cities",
    tag = "Catalog",
    params(
        ("search" = Option<String>, Query, description = "Name or postal code prefix"),
        ("page" = Option<u64>, Query, description = "Page number (1-based)"),
        ("per_page" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Paginated city list")
    )
)]
pub async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<CitiesQuery>,
) -> AppResult<Json<Paginated<City>>> {
    let params = PaginationParams::new(query.page, query.per_page);
    let (cities, total) = state
        .catalog_service
        .cities(query.search, &params)
        .await?;

    Ok(Json(Paginated::new(cities, &params, total)))
}

/// List all supported sports
#[utoipa::path(
    get,
    path = "/sports",
    tag = "Catalog",
    responses(
        (status = 200, description = "Sport list", body = [Sport])
    )
)]
pub async fn list_sports(State(state): State<AppState>) -> AppResult<Json<Vec<Sport>>> {
    let sports = state.catalog_service.sports().await?;
    Ok(Json(sports))
}
