//! Participation persistence: match rosters, validation and scoring.
//!
//! Row creation happens inside the seat-booking transaction, not here.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::domain::Participation;
use crate::errors::{AppError, AppResult};

use super::entities::participation;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ParticipationRepository: Send + Sync {
    async fn list_for_match(&self, match_id: Uuid) -> AppResult<Vec<Participation>>;
    async fn list_for_team(&self, team_id: Uuid) -> AppResult<Vec<Participation>>;
    async fn find(&self, user_id: Uuid, match_id: Uuid) -> AppResult<Option<Participation>>;
    async fn count_for_match(&self, match_id: Uuid) -> AppResult<u64>;
    async fn remove(&self, user_id: Uuid, match_id: Uuid) -> AppResult<()>;
    async fn set_validated(
        &self,
        user_id: Uuid,
        match_id: Uuid,
        validated: bool,
    ) -> AppResult<Participation>;
    async fn set_score(&self, user_id: Uuid, match_id: Uuid, score: i16)
        -> AppResult<Participation>;
    async fn set_team(
        &self,
        user_id: Uuid,
        match_id: Uuid,
        team_id: Option<Uuid>,
    ) -> AppResult<Participation>;
}

/// SeaORM-backed participation repository
#[derive(Clone)]
pub struct ParticipationStore {
    db: DatabaseConnection,
}

impl ParticipationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, user_id: Uuid, match_id: Uuid) -> AppResult<participation::Model> {
        participation::Entity::find_by_id((user_id, match_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl ParticipationRepository for ParticipationStore {
    async fn list_for_match(&self, match_id: Uuid) -> AppResult<Vec<Participation>> {
        let rows = participation::Entity::find()
            .filter(participation::Column::MatchId.eq(match_id))
            .order_by_asc(participation::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Participation::from).collect())
    }

    async fn list_for_team(&self, team_id: Uuid) -> AppResult<Vec<Participation>> {
        let rows = participation::Entity::find()
            .filter(participation::Column::TeamId.eq(team_id))
            .order_by_asc(participation::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Participation::from).collect())
    }

    async fn find(&self, user_id: Uuid, match_id: Uuid) -> AppResult<Option<Participation>> {
        let found = participation::Entity::find_by_id((user_id, match_id))
            .one(&self.db)
            .await?;
        Ok(found.map(Participation::from))
    }

    async fn count_for_match(&self, match_id: Uuid) -> AppResult<u64> {
        let count = participation::Entity::find()
            .filter(participation::Column::MatchId.eq(match_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn remove(&self, user_id: Uuid, match_id: Uuid) -> AppResult<()> {
        let result = participation::Entity::delete_by_id((user_id, match_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn set_validated(
        &self,
        user_id: Uuid,
        match_id: Uuid,
        validated: bool,
    ) -> AppResult<Participation> {
        let mut active: participation::ActiveModel = self.load(user_id, match_id).await?.into();
        active.validated = Set(validated);

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn set_score(
        &self,
        user_id: Uuid,
        match_id: Uuid,
        score: i16,
    ) -> AppResult<Participation> {
        let mut active: participation::ActiveModel = self.load(user_id, match_id).await?.into();
        active.score = Set(Some(score));

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn set_team(
        &self,
        user_id: Uuid,
        match_id: Uuid,
        team_id: Option<Uuid>,
    ) -> AppResult<Participation> {
        let mut active: participation::ActiveModel = self.load(user_id, match_id).await?.into();
        active.team_id = Set(team_id);

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }
}
