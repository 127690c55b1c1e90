//! HTTP request handlers, grouped by resource.

pub mod auth_handler;
pub mod catalog_handler;
pub mod match_handler;
pub mod participation_handler;
pub mod team_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use catalog_handler::catalog_routes;
pub use match_handler::match_routes;
pub use participation_handler::participation_routes;
pub use team_handler::{match_team_routes, team_routes};
pub use user_handler::user_routes;
