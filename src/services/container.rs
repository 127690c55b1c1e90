//! Service container: centralized access to all application services.

use std::sync::Arc;

use super::{
    AuthService, CatalogService, MatchService, ParticipationService, TeamService, UserService,
};
use crate::config::Config;
use crate::infra::{Cache, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;
    fn users(&self) -> Arc<dyn UserService>;
    fn matches(&self) -> Arc<dyn MatchService>;
    fn participations(&self) -> Arc<dyn ParticipationService>;
    fn teams(&self) -> Arc<dyn TeamService>;
    fn catalog(&self) -> Arc<dyn CatalogService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    match_service: Arc<dyn MatchService>,
    participation_service: Arc<dyn ParticipationService>,
    team_service: Arc<dyn TeamService>,
    catalog_service: Arc<dyn CatalogService>,
}

impl Services {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        match_service: Arc<dyn MatchService>,
        participation_service: Arc<dyn ParticipationService>,
        team_service: Arc<dyn TeamService>,
        catalog_service: Arc<dyn CatalogService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            match_service,
            participation_service,
            team_service,
            catalog_service,
        }
    }

    /// Create a service container from a database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, cache: Cache, config: Config) -> Self {
        use super::{
            Authenticator, CatalogManager, MatchManager, ParticipationManager, TeamManager,
            UserManager,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), Arc::new(cache), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            match_service: Arc::new(MatchManager::new(uow.clone())),
            participation_service: Arc::new(ParticipationManager::new(uow.clone())),
            team_service: Arc::new(TeamManager::new(uow.clone())),
            catalog_service: Arc::new(CatalogManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn matches(&self) -> Arc<dyn MatchService> {
        self.match_service.clone()
    }

    fn participations(&self) -> Arc<dyn ParticipationService> {
        self.participation_service.clone()
    }

    fn teams(&self) -> Arc<dyn TeamService> {
        self.team_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }
}
