//! Shared types used across handlers and services.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use response::{MessageResponse, NoContent};
