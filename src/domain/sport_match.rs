//! Match domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A scheduled sporting event with a capacity and an organizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub sport_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub min_players: i32,
    pub max_players: i32,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub scheduled_at: DateTime<Utc>,
    pub description: Option<String>,
    pub recommended_level: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn is_organizer(&self, user_id: Uuid) -> bool {
        self.organizer_id == user_id
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at <= now
    }
}

/// Data needed to insert a new match. Player bounds are already resolved
/// against the sport's defaults by the service layer.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub organizer_id: Uuid,
    pub sport_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub min_players: i32,
    pub max_players: i32,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub scheduled_at: DateTime<Utc>,
    pub description: Option<String>,
    pub recommended_level: i16,
}

/// Organizer-editable match fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct MatchChanges {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub recommended_level: Option<i16>,
}

/// Match representation returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchResponse {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub sport_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub min_players: i32,
    pub max_players: i32,
    #[schema(value_type = f64, example = 2.5)]
    pub price: Decimal,
    pub duration_minutes: i32,
    /// Duration rendered as "HH:MM"
    #[schema(example = "01:30")]
    pub duration: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(minimum = 0, maximum = 5)]
    pub recommended_level: i16,
    pub created_at: DateTime<Utc>,
    /// Current number of participants (only populated on detail views)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u64>,
}

impl MatchResponse {
    pub fn with_participants(mut self, count: u64) -> Self {
        self.participant_count = Some(count);
        self
    }
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
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
            duration: format_duration(m.duration_minutes),
            scheduled_at: m.scheduled_at,
            description: m.description,
            recommended_level: m.recommended_level,
            created_at: m.created_at,
            participant_count: None,
        }
    }
}

/// Render a duration in minutes as "HH:MM".
pub fn format_duration(minutes: i32) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formats_as_hours_minutes() {
        assert_eq!(format_duration(90), "01:30");
        assert_eq!(format_duration(60), "01:00");
        assert_eq!(format_duration(5), "00:05");
        assert_eq!(format_duration(-10), "00:00");
    }

    #[test]
    fn started_matches_are_detected() {
        let now = Utc::now();
        let m = Match {
            id: Uuid::new_v4(),
            organizer_id: Uuid::new_v4(),
            sport_id: 1,
            latitude: 47.218,
            longitude: -1.553,
            min_players: 10,
            max_players: 22,
            price: Decimal::ZERO,
            duration_minutes: 90,
            scheduled_at: now - chrono::Duration::minutes(1),
            description: None,
            recommended_level: 2,
            created_at: now,
            updated_at: now,
        };
        assert!(m.has_started(now));
        assert!(!m.has_started(now - chrono::Duration::hours(1)));
    }
}
