//! User service: profiles and per-sport skill levels.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::is_valid_level;
use crate::domain::{SkillLevel, UpdateProfile, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch a user by id
    async fn get(&self, user_id: Uuid) -> AppResult<User>;

    /// Update the user's own profile
    async fn update_profile(&self, user_id: Uuid, changes: UpdateProfile) -> AppResult<User>;

    /// List the user's declared skill levels
    async fn levels(&self, user_id: Uuid) -> AppResult<Vec<SkillLevel>>;

    /// Declare or update a skill level for one sport
    async fn set_level(
        &self,
        user_id: Uuid,
        sport_id: i32,
        level: i16,
        description: Option<String>,
    ) -> AppResult<SkillLevel>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get(&self, user_id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(user_id).await?.ok_or_not_found()
    }

    async fn update_profile(&self, user_id: Uuid, changes: UpdateProfile) -> AppResult<User> {
        if changes.is_empty() {
            return Err(AppError::invalid_request("No fields to update."));
        }

        if let Some(city_id) = changes.city_id {
            if self.uow.catalog().find_city(city_id).await?.is_none() {
                return Err(AppError::invalid_request("Unknown city."));
            }
        }

        self.uow.users().update_profile(user_id, changes).await
    }

    async fn levels(&self, user_id: Uuid) -> AppResult<Vec<SkillLevel>> {
        self.uow.users().levels(user_id).await
    }

    async fn set_level(
        &self,
        user_id: Uuid,
        sport_id: i32,
        level: i16,
        description: Option<String>,
    ) -> AppResult<SkillLevel> {
        if !is_valid_level(level) {
            return Err(AppError::invalid_request("Level must be between 0 and 5."));
        }

        if self.uow.catalog().find_sport(sport_id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        self.uow
            .users()
            .upsert_level(SkillLevel {
                user_id,
                sport_id,
                level,
                description,
            })
            .await
    }
}
