//! Team persistence.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::domain::Team;
use crate::errors::{AppError, AppResult};

use super::entities::team;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn list_for_match(&self, match_id: Uuid) -> AppResult<Vec<Team>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Team>>;
    async fn name_taken(&self, match_id: Uuid, name: &str) -> AppResult<bool>;
    async fn create(&self, match_id: Uuid, name: String) -> AppResult<Team>;
    async fn rename(&self, id: Uuid, name: String) -> AppResult<Team>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed team repository
#[derive(Clone)]
pub struct TeamStore {
    db: DatabaseConnection,
}

impl TeamStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepository for TeamStore {
    async fn list_for_match(&self, match_id: Uuid) -> AppResult<Vec<Team>> {
        let rows = team::Entity::find()
            .filter(team::Column::MatchId.eq(match_id))
            .order_by_asc(team::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Team>> {
        let found = team::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Team::from))
    }

    async fn name_taken(&self, match_id: Uuid, name: &str) -> AppResult<bool> {
        let count = team::Entity::find()
            .filter(team::Column::MatchId.eq(match_id))
            .filter(team::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, match_id: Uuid, name: String) -> AppResult<Team> {
        let model = team::ActiveModel {
            id: Set(Uuid::new_v4()),
            match_id: Set(match_id),
            name: Set(name),
        };

        let inserted = model.insert(&self.db).await?;
        Ok(inserted.into())
    }

    async fn rename(&self, id: Uuid, name: String) -> AppResult<Team> {
        let existing = team::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: team::ActiveModel = existing.into();
        active.name = Set(name);

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = team::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
