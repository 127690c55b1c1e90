//! User persistence: accounts and per-sport skill levels.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::domain::{NewUser, SkillLevel, UpdateProfile, User};
use crate::errors::{AppError, AppResult};

use super::entities::{user, user_level};

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn email_exists(&self, email: &str) -> AppResult<bool>;
    async fn create(&self, data: NewUser) -> AppResult<User>;
    async fn update_profile(&self, id: Uuid, changes: UpdateProfile) -> AppResult<User>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
    async fn levels(&self, user_id: Uuid) -> AppResult<Vec<SkillLevel>>;
    async fn upsert_level(&self, level: SkillLevel) -> AppResult<SkillLevel>;
}

/// SeaORM-backed user repository
#[derive(Clone)]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let found = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(found.map(User::from))
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            city_id: Set(data.city_id),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            email: Set(data.email),
            phone_number: Set(data.phone_number),
            password_hash: Set(data.password_hash),
            birthdate: Set(data.birthdate),
            profile_picture_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await?;
        Ok(inserted.into())
    }

    async fn update_profile(&self, id: Uuid, changes: UpdateProfile) -> AppResult<User> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = existing.into();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(phone_number) = changes.phone_number {
            active.phone_number = Set(Some(phone_number));
        }
        if let Some(url) = changes.profile_picture_url {
            active.profile_picture_url = Set(Some(url));
        }
        if let Some(city_id) = changes.city_id {
            active.city_id = Set(city_id);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn levels(&self, user_id: Uuid) -> AppResult<Vec<SkillLevel>> {
        let rows = user_level::Entity::find()
            .filter(user_level::Column::UserId.eq(user_id))
            .order_by_asc(user_level::Column::SportId)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(SkillLevel::from).collect())
    }

    async fn upsert_level(&self, level: SkillLevel) -> AppResult<SkillLevel> {
        let model = user_level::ActiveModel {
            user_id: Set(level.user_id),
            sport_id: Set(level.sport_id),
            level: Set(level.level),
            description: Set(level.description.clone()),
        };

        user_level::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([user_level::Column::UserId, user_level::Column::SportId])
                    .update_columns([user_level::Column::Level, user_level::Column::Description])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(level)
    }
}
