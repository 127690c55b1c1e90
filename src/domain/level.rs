//! Per-user per-sport skill level.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A user's self-declared level for one sport. One row per user/sport pair,
/// level between 0 and 5.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SkillLevel {
    pub user_id: Uuid,
    pub sport_id: i32,
    #[schema(minimum = 0, maximum = 5)]
    pub level: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
