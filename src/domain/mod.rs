//! Domain layer - Core business entities and logic
//!
//! Contains the business concepts of the matchmaking service independent of
//! infrastructure concerns: users and their per-sport skill levels, the city
//! and sport catalogs, matches, participations and teams.

pub mod catalog;
pub mod level;
pub mod participation;
pub mod password;
pub mod sport_match;
pub mod team;
pub mod user;

pub use catalog::{City, Sport};
pub use level::SkillLevel;
pub use participation::Participation;
pub use password::Password;
pub use sport_match::{Match, MatchChanges, MatchResponse, NewMatch};
pub use team::{Team, TeamRoster};
pub use user::{NewUser, PublicProfile, UpdateProfile, User, UserResponse};
