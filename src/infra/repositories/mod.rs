//! Data access layer.
//!
//! Each repository exposes a trait (mockable in tests) and a SeaORM-backed
//! implementation over domain types. Entities stay private to this layer.

pub mod entities;

pub mod catalog_repository;
pub mod match_repository;
pub mod participation_repository;
pub mod team_repository;
pub mod user_repository;

pub use catalog_repository::{CatalogRepository, CatalogStore};
pub use match_repository::{MatchFilter, MatchRepository, MatchStore};
pub use participation_repository::{ParticipationRepository, ParticipationStore};
pub use team_repository::{TeamRepository, TeamStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use catalog_repository::MockCatalogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use match_repository::MockMatchRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use participation_repository::MockParticipationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use team_repository::MockTeamRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
