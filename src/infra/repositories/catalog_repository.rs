//! Read-only access to the reference catalog (cities and sports).

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::domain::{City, Sport};
use crate::errors::AppResult;
use crate::types::PaginationParams;

use super::entities::{city, sport};

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List cities, optionally filtered by name prefix or postal code,
    /// together with the total row count for the filter.
    async fn list_cities(
        &self,
        search: Option<String>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<City>, u64)>;
    async fn find_city(&self, id: i32) -> AppResult<Option<City>>;
    async fn list_sports(&self) -> AppResult<Vec<Sport>>;
    async fn find_sport(&self, id: i32) -> AppResult<Option<Sport>>;
}

/// SeaORM-backed catalog repository
#[derive(Clone)]
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn list_cities(
        &self,
        search: Option<String>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<City>, u64)> {
        let mut query = city::Entity::find().order_by_asc(city::Column::Name);

        if let Some(term) = search.filter(|t| !t.trim().is_empty()) {
            let term = term.trim().to_string();
            query = query.filter(
                Condition::any()
                    .add(city::Column::Name.starts_with(term.clone()))
                    .add(city::Column::PostalCode.starts_with(term)),
            );
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.page_index()).await?;

        Ok((rows.into_iter().map(City::from).collect(), total))
    }

    async fn find_city(&self, id: i32) -> AppResult<Option<City>> {
        let found = city::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(City::from))
    }

    async fn list_sports(&self) -> AppResult<Vec<Sport>> {
        let rows = sport::Entity::find()
            .order_by_asc(sport::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Sport::from).collect())
    }

    async fn find_sport(&self, id: i32) -> AppResult<Option<Sport>> {
        let found = sport::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Sport::from))
    }
}
