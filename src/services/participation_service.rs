//! Participation service: joining, leaving, validating and scoring.
//!
//! Joining runs in a serializable transaction so the capacity check and
//! the insert see a consistent participant count under concurrency.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::is_valid_level;
use crate::domain::{Match, Participation};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Decide whether a user may claim a seat in the given match.
///
/// Evaluated inside the seat-booking transaction, against the participant
/// count that transaction sees.
fn check_seat(m: &Match, already_joined: bool, taken: u64, now: DateTime<Utc>) -> AppResult<()> {
    if m.has_started(now) {
        return Err(AppError::invalid_request("This match has already started."));
    }
    if already_joined {
        return Err(AppError::invalid_request(
            "You already participate in this match.",
        ));
    }
    if taken >= m.max_players as u64 {
        return Err(AppError::invalid_request("This match is full."));
    }
    Ok(())
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ParticipationService: Send + Sync {
    /// List the participants of a match
    async fn roster(&self, match_id: Uuid) -> AppResult<Vec<Participation>>;

    /// Join a match, claiming one of the remaining seats
    async fn join(&self, user_id: Uuid, match_id: Uuid) -> AppResult<Participation>;

    /// Leave a match
    async fn leave(&self, user_id: Uuid, match_id: Uuid) -> AppResult<()>;

    /// Confirm or revoke a participant's attendance; organizer only
    async fn validate(
        &self,
        actor: Uuid,
        match_id: Uuid,
        user_id: Uuid,
        validated: bool,
    ) -> AppResult<Participation>;

    /// Record the participant's own score for a validated participation
    async fn score(&self, actor: Uuid, match_id: Uuid, score: i16) -> AppResult<Participation>;
}

/// Concrete implementation of ParticipationService using Unit of Work.
pub struct ParticipationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ParticipationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ParticipationService for ParticipationManager<U> {
    async fn roster(&self, match_id: Uuid) -> AppResult<Vec<Participation>> {
        self.uow
            .matches()
            .find_by_id(match_id)
            .await?
            .ok_or_not_found()?;

        self.uow.participations().list_for_match(match_id).await
    }

    async fn join(&self, user_id: Uuid, match_id: Uuid) -> AppResult<Participation> {
        let joined = self
            .uow
            .transaction_serializable(|ctx| {
                Box::pin(async move {
                    let m = ctx
                        .matches()
                        .find_by_id(match_id)
                        .await?
                        .ok_or_not_found()?;

                    let already_joined = ctx.participations().exists(user_id, match_id).await?;
                    let taken = ctx.participations().count_for_match(match_id).await?;
                    check_seat(&m, already_joined, taken, Utc::now())?;

                    ctx.participations().insert(user_id, match_id).await
                })
            })
            .await?;

        tracing::info!(user_id = %user_id, match_id = %match_id, "Joined match");
        Ok(joined)
    }

    async fn leave(&self, user_id: Uuid, match_id: Uuid) -> AppResult<()> {
        self.uow.participations().remove(user_id, match_id).await?;
        tracing::info!(user_id = %user_id, match_id = %match_id, "Left match");
        Ok(())
    }

    async fn validate(
        &self,
        actor: Uuid,
        match_id: Uuid,
        user_id: Uuid,
        validated: bool,
    ) -> AppResult<Participation> {
        let m = self
            .uow
            .matches()
            .find_by_id(match_id)
            .await?
            .ok_or_not_found()?;
        if !m.is_organizer(actor) {
            return Err(AppError::Forbidden);
        }

        self.uow
            .participations()
            .find(user_id, match_id)
            .await?
            .ok_or_not_found()?;

        self.uow
            .participations()
            .set_validated(user_id, match_id, validated)
            .await
    }

    async fn score(&self, actor: Uuid, match_id: Uuid, score: i16) -> AppResult<Participation> {
        if !is_valid_level(score) {
            return Err(AppError::invalid_request("Score must be between 0 and 5."));
        }

        let participation = self
            .uow
            .participations()
            .find(actor, match_id)
            .await?
            .ok_or_not_found()?;

        if !participation.validated {
            return Err(AppError::invalid_request(
                "Participation has not been validated yet.",
            ));
        }

        self.uow
            .participations()
            .set_score(actor, match_id, score)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn upcoming_match(max_players: i32) -> Match {
        let now = Utc::now();
        Match {
            id: Uuid::new_v4(),
            organizer_id: Uuid::new_v4(),
            sport_id: 1,
            latitude: 47.218,
            longitude: -1.553,
            min_players: 2,
            max_players,
            price: Decimal::ZERO,
            duration_minutes: 90,
            scheduled_at: now + chrono::Duration::hours(2),
            description: None,
            recommended_level: 2,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn seat_granted_while_capacity_remains() {
        let m = upcoming_match(10);
        assert!(check_seat(&m, false, 9, Utc::now()).is_ok());
    }

    #[test]
    fn full_match_rejects_join() {
        let m = upcoming_match(10);
        let result = check_seat(&m, false, 10, Utc::now());
        assert!(matches!(result, Err(AppError::InvalidRequest(msg)) if msg.contains("full")));
    }

    #[test]
    fn duplicate_join_is_rejected() {
        let m = upcoming_match(10);
        let result = check_seat(&m, true, 3, Utc::now());
        assert!(matches!(
            result,
            Err(AppError::InvalidRequest(msg)) if msg.contains("already participate")
        ));
    }

    #[test]
    fn started_match_rejects_join_even_with_seats_left() {
        let mut m = upcoming_match(10);
        m.scheduled_at = Utc::now() - chrono::Duration::minutes(5);
        let result = check_seat(&m, false, 0, Utc::now());
        assert!(matches!(
            result,
            Err(AppError::InvalidRequest(msg)) if msg.contains("started")
        ));
    }
}
