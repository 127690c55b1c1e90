//! Match persistence and search.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::domain::{Match, MatchChanges, NewMatch};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

use super::entities::matches;

/// Search criteria for upcoming matches. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub sport_id: Option<i32>,
    pub starts_after: Option<DateTime<Utc>>,
    pub starts_before: Option<DateTime<Utc>>,
    pub max_level: Option<i16>,
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create(&self, data: NewMatch) -> AppResult<Match>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Match>>;
    /// Search matches ordered by schedule, with the total count for the filter.
    async fn search(
        &self,
        filter: MatchFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Match>, u64)>;
    async fn update(&self, id: Uuid, changes: MatchChanges) -> AppResult<Match>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed match repository
#[derive(Clone)]
pub struct MatchStore {
    db: DatabaseConnection,
}

impl MatchStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MatchRepository for MatchStore {
    async fn create(&self, data: NewMatch) -> AppResult<Match> {
        let now = Utc::now();
        let model = matches::ActiveModel {
            id: Set(Uuid::new_v4()),
            organizer_id: Set(data.organizer_id),
            sport_id: Set(data.sport_id),
            latitude: Set(data.latitude),
            longitude: Set(data.longitude),
            min_players: Set(data.min_players),
            max_players: Set(data.max_players),
            price: Set(data.price),
            duration_minutes: Set(data.duration_minutes),
            scheduled_at: Set(data.scheduled_at),
            description: Set(data.description),
            recommended_level: Set(data.recommended_level),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Match>> {
        let found = matches::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Match::from))
    }

    async fn search(
        &self,
        filter: MatchFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Match>, u64)> {
        let mut query = matches::Entity::find().order_by_asc(matches::Column::ScheduledAt);

        if let Some(sport_id) = filter.sport_id {
            query = query.filter(matches::Column::SportId.eq(sport_id));
        }
        if let Some(after) = filter.starts_after {
            query = query.filter(matches::Column::ScheduledAt.gte(after));
        }
        if let Some(before) = filter.starts_before {
            query = query.filter(matches::Column::ScheduledAt.lte(before));
        }
        if let Some(max_level) = filter.max_level {
            query = query.filter(matches::Column::RecommendedLevel.lte(max_level));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.page_index()).await?;

        Ok((rows.into_iter().map(Match::from).collect(), total))
    }

    async fn update(&self, id: Uuid, changes: MatchChanges) -> AppResult<Match> {
        let existing = matches::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: matches::ActiveModel = existing.into();
        if let Some(latitude) = changes.latitude {
            active.latitude = Set(latitude);
        }
        if let Some(longitude) = changes.longitude {
            active.longitude = Set(longitude);
        }
        if let Some(min_players) = changes.min_players {
            active.min_players = Set(min_players);
        }
        if let Some(max_players) = changes.max_players {
            active.max_players = Set(max_players);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(duration_minutes) = changes.duration_minutes {
            active.duration_minutes = Set(duration_minutes);
        }
        if let Some(scheduled_at) = changes.scheduled_at {
            active.scheduled_at = Set(scheduled_at);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(recommended_level) = changes.recommended_level {
            active.recommended_level = Set(recommended_level);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = matches::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
