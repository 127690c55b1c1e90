//! Participation: a user's membership record in a match.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Join row between a user and a match. `validated` is set by the organizer
/// once the user showed up; `score` is the participant's 0..=5 rating of the
/// match and can only be set after validation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Participation {
    pub user_id: Uuid,
    pub match_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Uuid>,
    pub validated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 0, maximum = 5)]
    pub score: Option<i16>,
    pub created_at: DateTime<Utc>,
}
