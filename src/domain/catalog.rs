//! City and sport catalog entities.
//!
//! Both catalogs are reference data: cities come from a bulk import, sports
//! are seeded by migration with their default player bounds.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A city a user can live in or a match can reference
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct City {
    pub id: i32,
    #[schema(example = "Nantes")]
    pub name: String,
    #[schema(example = "44000")]
    pub postal_code: String,
    pub department_name: String,
    pub department_code: String,
    pub region_name: String,
    pub region_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A sport with its default player bounds, used when a match omits its own
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Sport {
    pub id: i32,
    #[schema(example = "football")]
    pub name: String,
    pub default_min_players: i32,
    pub default_max_players: i32,
}
