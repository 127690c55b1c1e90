//! Application state - dependency injection container.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::services::{
    AuthService, CatalogService, MatchService, ParticipationService, ServiceContainer, Services,
    TeamService, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub match_service: Arc<dyn MatchService>,
    pub participation_service: Arc<dyn ParticipationService>,
    pub team_service: Arc<dyn TeamService>,
    pub catalog_service: Arc<dyn CatalogService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: crate::config::Config,
    ) -> Self {
        let container = Services::from_connection(
            database.get_connection(),
            cache.as_ref().clone(),
            config,
        );

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            match_service: container.matches(),
            participation_service: container.participations(),
            team_service: container.teams(),
            catalog_service: container.catalog(),
            cache,
            database,
        }
    }

    /// Create application state with manually injected services (tests).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        match_service: Arc<dyn MatchService>,
        participation_service: Arc<dyn ParticipationService>,
        team_service: Arc<dyn TeamService>,
        catalog_service: Arc<dyn CatalogService>,
        cache: Arc<Cache>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            match_service,
            participation_service,
            team_service,
            catalog_service,
            cache,
            database,
        }
    }
}
