//! `matches` table entity.

use sea_orm::entity::prelude::*;

use crate::domain::Match;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub sport_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub min_players: i32,
    pub max_players: i32,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub scheduled_at: DateTimeUtc,
    pub description: Option<String>,
    pub recommended_level: i16,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OrganizerId",
        to = "super::user::Column::Id"
    )]
    Organizer,
    #[sea_orm(
        belongs_to = "super::sport::Entity",
        from = "Column::SportId",
        to = "super::sport::Column::Id"
    )]
    Sport,
    #[sea_orm(has_many = "super::participation::Entity")]
    Participations,
    #[sea_orm(has_many = "super::team::Entity")]
    Teams,
}

impl Related<super::participation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Match {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            organizer_id: m.organizer_id,
            sport_id: m.sport_id,
            latitude: m.latitude,
            longitude: m.longitude,
            min_players: m.min_players,
            max_players: m.max_players,
            price: m.price,
            duration_minutes: m.duration_minutes,
            scheduled_at: m.scheduled_at,
            description: m.description,
            recommended_level: m.recommended_level,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
