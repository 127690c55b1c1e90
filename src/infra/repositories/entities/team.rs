//! `team` table entity. Name is unique within a match.

use sea_orm::entity::prelude::*;

use crate::domain::Team;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub match_id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
    #[sea_orm(has_many = "super::participation::Entity")]
    Members,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Team {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            match_id: m.match_id,
            name: m.name,
        }
    }
}
