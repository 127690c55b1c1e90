//! `user_level` table entity. Composite primary key (user_id, sport_id).

use sea_orm::entity::prelude::*;

use crate::domain::SkillLevel;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_level")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub sport_id: i32,
    pub level: i16,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::sport::Entity",
        from = "Column::SportId",
        to = "super::sport::Column::Id"
    )]
    Sport,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SkillLevel {
    fn from(m: Model) -> Self {
        Self {
            user_id: m.user_id,
            sport_id: m.sport_id,
            level: m.level,
            description: m.description,
        }
    }
}
