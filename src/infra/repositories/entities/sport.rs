//! `sport` table entity.

use sea_orm::entity::prelude::*;

use crate::domain::Sport;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sport")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub default_min_players: i32,
    pub default_max_players: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Sport {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            default_min_players: m.default_min_players,
            default_max_players: m.default_max_players,
        }
    }
}
