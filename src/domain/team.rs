//! Team: a named sub-group of participants within a match.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Team row. Name is unique within its match.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Team {
    pub id: Uuid,
    pub match_id: Uuid,
    #[schema(example = "Les Rouges")]
    pub name: String,
}

/// A team together with the user ids assigned to it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamRoster {
    pub id: Uuid,
    pub match_id: Uuid,
    pub name: String,
    pub members: Vec<Uuid>,
}

impl TeamRoster {
    pub fn new(team: Team, members: Vec<Uuid>) -> Self {
        Self {
            id: team.id,
            match_id: team.match_id,
            name: team.name,
            members,
        }
    }
}
