//! Team service: organizer-managed team composition within a match.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Match, Team, TeamRoster};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait TeamService: Send + Sync {
    /// List a match's teams with their member ids
    async fn list(&self, match_id: Uuid) -> AppResult<Vec<TeamRoster>>;

    /// Create a team; organizer only, name unique within the match
    async fn create(&self, actor: Uuid, match_id: Uuid, name: String) -> AppResult<Team>;

    /// Rename a team; organizer only
    async fn rename(&self, actor: Uuid, team_id: Uuid, name: String) -> AppResult<Team>;

    /// Delete a team, releasing its members; organizer only
    async fn delete(&self, actor: Uuid, team_id: Uuid) -> AppResult<()>;

    /// Put a participant into a team; organizer only
    async fn assign(
        &self,
        actor: Uuid,
        team_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<()>;

    /// Remove a participant from a team; organizer only
    async fn unassign(&self, actor: Uuid, team_id: Uuid, user_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of TeamService using Unit of Work.
pub struct TeamManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TeamManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn require_match(&self, match_id: Uuid) -> AppResult<Match> {
        self.uow
            .matches()
            .find_by_id(match_id)
            .await?
            .ok_or_not_found()
    }

    async fn require_organizer(&self, actor: Uuid, match_id: Uuid) -> AppResult<Match> {
        let m = self.require_match(match_id).await?;
        if !m.is_organizer(actor) {
            return Err(AppError::Forbidden);
        }
        Ok(m)
    }

    async fn require_team(&self, team_id: Uuid) -> AppResult<Team> {
        self.uow
            .teams()
            .find_by_id(team_id)
            .await?
            .ok_or_not_found()
    }
}

#[async_trait]
impl<U: UnitOfWork> TeamService for TeamManager<U> {
    async fn list(&self, match_id: Uuid) -> AppResult<Vec<TeamRoster>> {
        self.require_match(match_id).await?;

        let teams = self.uow.teams().list_for_match(match_id).await?;
        let mut rosters = Vec::with_capacity(teams.len());
        for team in teams {
            let members = self
                .uow
                .participations()
                .list_for_team(team.id)
                .await?
                .into_iter()
                .map(|p| p.user_id)
                .collect();
            rosters.push(TeamRoster::new(team, members));
        }

        Ok(rosters)
    }

    async fn create(&self, actor: Uuid, match_id: Uuid, name: String) -> AppResult<Team> {
        self.require_organizer(actor, match_id).await?;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::invalid_request("Team name cannot be empty."));
        }
        if self.uow.teams().name_taken(match_id, &name).await? {
            return Err(AppError::invalid_request(
                "A team with this name already exists for this match.",
            ));
        }

        self.uow.teams().create(match_id, name).await
    }

    async fn rename(&self, actor: Uuid, team_id: Uuid, name: String) -> AppResult<Team> {
        let team = self.require_team(team_id).await?;
        self.require_organizer(actor, team.match_id).await?;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::invalid_request("Team name cannot be empty."));
        }
        if name != team.name && self.uow.teams().name_taken(team.match_id, &name).await? {
            return Err(AppError::invalid_request(
                "A team with this name already exists for this match.",
            ));
        }

        self.uow.teams().rename(team_id, name).await
    }

    async fn delete(&self, actor: Uuid, team_id: Uuid) -> AppResult<()> {
        let team = self.require_team(team_id).await?;
        self.require_organizer(actor, team.match_id).await?;

        // participation.team_id is cleared by the foreign key's SET NULL
        self.uow.teams().delete(team_id).await
    }

    async fn assign(&self, actor: Uuid, team_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let team = self.require_team(team_id).await?;
        self.require_organizer(actor, team.match_id).await?;

        let participation = self
            .uow
            .participations()
            .find(user_id, team.match_id)
            .await?;
        if participation.is_none() {
            return Err(AppError::invalid_request(
                "This user does not participate in the match.",
            ));
        }

        self.uow
            .participations()
            .set_team(user_id, team.match_id, Some(team_id))
            .await?;
        Ok(())
    }

    async fn unassign(&self, actor: Uuid, team_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let team = self.require_team(team_id).await?;
        self.require_organizer(actor, team.match_id).await?;

        let participation = self
            .uow
            .participations()
            .find(user_id, team.match_id)
            .await?
            .ok_or_not_found()?;
        if participation.team_id != Some(team_id) {
            return Err(AppError::invalid_request("This user is not in the team."));
        }

        self.uow
            .participations()
            .set_team(user_id, team.match_id, None)
            .await?;
        Ok(())
    }
}
