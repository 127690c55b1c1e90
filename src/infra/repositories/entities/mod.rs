//! SeaORM entity definitions
//!
//! Database-specific entities, kept separate from the domain models and
//! converted at the repository boundary.

pub mod city;
pub mod matches;
pub mod participation;
pub mod sport;
pub mod team;
pub mod user;
pub mod user_level;
