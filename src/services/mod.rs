//! Application services layer - use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure. They depend on
//! the Unit of Work abstraction so repositories can be swapped in tests.

mod auth_service;
mod catalog_service;
pub mod container;
mod match_service;
mod participation_service;
mod team_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{
    AuthService, Authenticator, Claims, Registration, TokenDenylist, TokenResponse,
};
pub use catalog_service::{CatalogManager, CatalogService};
pub use match_service::{CreateMatch, MatchManager, MatchSearch, MatchService};
pub use participation_service::{ParticipationManager, ParticipationService};
pub use team_service::{TeamManager, TeamService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use catalog_service::MockCatalogService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use match_service::MockMatchService;
#[cfg(any(test, feature = "test-utils"))]
pub use participation_service::MockParticipationService;
#[cfg(any(test, feature = "test-utils"))]
pub use team_service::MockTeamService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
