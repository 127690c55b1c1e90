//! `city` table entity.

use sea_orm::entity::prelude::*;

use crate::domain::City;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "city")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub postal_code: String,
    pub department_name: String,
    pub department_code: String,
    pub region_name: String,
    pub region_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for City {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            postal_code: m.postal_code,
            department_name: m.department_name,
            department_code: m.department_code,
            region_name: m.region_name,
            region_code: m.region_code,
            latitude: m.latitude,
            longitude: m.longitude,
        }
    }
}
