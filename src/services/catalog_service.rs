//! Catalog service: read-only city and sport lookups.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{City, Sport};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List cities, optionally filtered by a search term
    async fn cities(
        &self,
        search: Option<String>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<City>, u64)>;

    /// List all supported sports
    async fn sports(&self) -> AppResult<Vec<Sport>>;
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn cities(
        &self,
        search: Option<String>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<City>, u64)> {
        self.uow.catalog().list_cities(search, params).await
    }

    async fn sports(&self) -> AppResult<Vec<Sport>> {
        self.uow.catalog().list_sports().await
    }
}
