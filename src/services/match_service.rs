//! Match service: creation, search and organizer-only maintenance.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{is_valid_level, MIN_MATCH_PLAYERS};
use crate::domain::{Match, MatchChanges, NewMatch};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::MatchFilter;
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Match creation input. Player bounds fall back to the sport's defaults
/// when omitted.
#[derive(Debug, Clone)]
pub struct CreateMatch {
    pub sport_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub scheduled_at: DateTime<Utc>,
    pub description: Option<String>,
    pub recommended_level: i16,
}

/// Match search input as received from the client
#[derive(Debug, Clone, Default)]
pub struct MatchSearch {
    pub sport_id: Option<i32>,
    pub within_days: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub max_level: Option<i16>,
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait MatchService: Send + Sync {
    /// Create a match organized by the given user
    async fn create(&self, organizer_id: Uuid, data: CreateMatch) -> AppResult<Match>;

    /// Fetch a match together with its current participant count
    async fn get(&self, id: Uuid) -> AppResult<(Match, u64)>;

    /// Search upcoming matches
    async fn search(
        &self,
        search: MatchSearch,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Match>, u64)>;

    /// Update a match; only the organizer is allowed to
    async fn update(&self, actor: Uuid, id: Uuid, changes: MatchChanges) -> AppResult<Match>;

    /// Delete a match; only the organizer is allowed to
    async fn delete(&self, actor: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of MatchService using Unit of Work.
pub struct MatchManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MatchManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn check_bounds(min_players: i32, max_players: i32) -> AppResult<()> {
        if min_players < MIN_MATCH_PLAYERS {
            return Err(AppError::invalid_request(format!(
                "A match needs at least {} players.",
                MIN_MATCH_PLAYERS
            )));
        }
        if min_players > max_players {
            return Err(AppError::invalid_request(
                "min_players cannot exceed max_players.",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> MatchService for MatchManager<U> {
    async fn create(&self, organizer_id: Uuid, data: CreateMatch) -> AppResult<Match> {
        let sport = self
            .uow
            .catalog()
            .find_sport(data.sport_id)
            .await?
            .ok_or_else(|| AppError::invalid_request("Unknown sport."))?;

        let min_players = data.min_players.unwrap_or(sport.default_min_players);
        let max_players = data.max_players.unwrap_or(sport.default_max_players);
        Self::check_bounds(min_players, max_players)?;

        if !is_valid_level(data.recommended_level) {
            return Err(AppError::invalid_request("Level must be between 0 and 5."));
        }
        if data.scheduled_at <= Utc::now() {
            return Err(AppError::invalid_request(
                "A match must be scheduled in the future.",
            ));
        }
        if data.duration_minutes <= 0 {
            return Err(AppError::invalid_request("Duration must be positive."));
        }
        if data.price < Decimal::ZERO {
            return Err(AppError::invalid_request("Price cannot be negative."));
        }

        let created = self
            .uow
            .matches()
            .create(NewMatch {
                organizer_id,
                sport_id: data.sport_id,
                latitude: data.latitude,
                longitude: data.longitude,
                min_players,
                max_players,
                price: data.price,
                duration_minutes: data.duration_minutes,
                scheduled_at: data.scheduled_at,
                description: data.description,
                recommended_level: data.recommended_level,
            })
            .await?;

        tracing::info!(match_id = %created.id, organizer_id = %organizer_id, "Match created");
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> AppResult<(Match, u64)> {
        let found = self.uow.matches().find_by_id(id).await?.ok_or_not_found()?;
        let count = self.uow.participations().count_for_match(id).await?;
        Ok((found, count))
    }

    async fn search(
        &self,
        search: MatchSearch,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Match>, u64)> {
        let now = Utc::now();
        let starts_before = match (search.to, search.within_days) {
            (Some(to), _) => Some(to),
            (None, Some(days)) => Some(now + Duration::days(days)),
            (None, None) => None,
        };

        let filter = MatchFilter {
            sport_id: search.sport_id,
            // Past matches are never listed
            starts_after: Some(search.from.unwrap_or(now).max(now)),
            starts_before,
            max_level: search.max_level,
        };

        self.uow.matches().search(filter, params).await
    }

    async fn update(&self, actor: Uuid, id: Uuid, changes: MatchChanges) -> AppResult<Match> {
        let existing = self.uow.matches().find_by_id(id).await?.ok_or_not_found()?;
        if !existing.is_organizer(actor) {
            return Err(AppError::Forbidden);
        }

        let min_players = changes.min_players.unwrap_or(existing.min_players);
        let max_players = changes.max_players.unwrap_or(existing.max_players);
        Self::check_bounds(min_players, max_players)?;

        if let Some(level) = changes.recommended_level {
            if !is_valid_level(level) {
                return Err(AppError::invalid_request("Level must be between 0 and 5."));
            }
        }
        if let Some(scheduled_at) = changes.scheduled_at {
            if scheduled_at <= Utc::now() {
                return Err(AppError::invalid_request(
                    "A match must be scheduled in the future.",
                ));
            }
        }
        if let Some(duration) = changes.duration_minutes {
            if duration <= 0 {
                return Err(AppError::invalid_request("Duration must be positive."));
            }
        }
        if let Some(price) = changes.price {
            if price < Decimal::ZERO {
                return Err(AppError::invalid_request("Price cannot be negative."));
            }
        }

        // Capacity cannot drop below the seats already taken
        if changes.max_players.is_some() {
            let taken = self.uow.participations().count_for_match(id).await?;
            if (max_players as u64) < taken {
                return Err(AppError::invalid_request(
                    "max_players cannot be lower than the current participant count.",
                ));
            }
        }

        self.uow.matches().update(id, changes).await
    }

    async fn delete(&self, actor: Uuid, id: Uuid) -> AppResult<()> {
        let existing = self.uow.matches().find_by_id(id).await?.ok_or_not_found()?;
        if !existing.is_organizer(actor) {
            return Err(AppError::Forbidden);
        }

        self.uow.matches().delete(id).await?;
        tracing::info!(match_id = %id, "Match deleted");
        Ok(())
    }
}
