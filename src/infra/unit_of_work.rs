//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and transaction management. Joining a
//! match checks capacity and inserts the participation row in the same
//! serializable transaction so two players cannot grab the last seat.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    CatalogRepository, CatalogStore, MatchRepository, MatchStore, ParticipationRepository,
    ParticipationStore, TeamRepository, TeamStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: the transaction methods are generic, so this trait is not
/// mockable directly. For testing, mock the individual repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn matches(&self) -> Arc<dyn MatchRepository>;
    fn participations(&self) -> Arc<dyn ParticipationRepository>;
    fn teams(&self) -> Arc<dyn TeamRepository>;
    fn catalog(&self) -> Arc<dyn CatalogRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access scoped to a single database transaction
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn matches(&self) -> TxMatchRepository<'_> {
        TxMatchRepository::new(self.txn)
    }

    pub fn participations(&self) -> TxParticipationRepository<'_> {
        TxParticipationRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    match_repo: Arc<MatchStore>,
    participation_repo: Arc<ParticipationStore>,
    team_repo: Arc<TeamStore>,
    catalog_repo: Arc<CatalogStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            match_repo: Arc::new(MatchStore::new(db.clone())),
            participation_repo: Arc::new(ParticipationStore::new(db.clone())),
            team_repo: Arc::new(TeamStore::new(db.clone())),
            catalog_repo: Arc::new(CatalogStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn matches(&self) -> Arc<dyn MatchRepository> {
        self.match_repo.clone()
    }

    fn participations(&self) -> Arc<dyn ParticipationRepository> {
        self.participation_repo.clone()
    }

    fn teams(&self) -> Arc<dyn TeamRepository> {
        self.team_repo.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f)
            .await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f)
            .await
    }
}

/// Transaction-aware match queries
pub struct TxMatchRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxMatchRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: uuid::Uuid) -> AppResult<Option<crate::domain::Match>> {
        use super::repositories::entities::matches::Entity as MatchEntity;
        use sea_orm::EntityTrait;

        let result = MatchEntity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(crate::domain::Match::from))
    }
}

/// Transaction-aware participation operations
pub struct TxParticipationRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxParticipationRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn exists(&self, user_id: uuid::Uuid, match_id: uuid::Uuid) -> AppResult<bool> {
        use super::repositories::entities::participation::Entity as ParticipationEntity;
        use sea_orm::EntityTrait;

        let found = ParticipationEntity::find_by_id((user_id, match_id))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(found.is_some())
    }

    pub async fn count_for_match(&self, match_id: uuid::Uuid) -> AppResult<u64> {
        use super::repositories::entities::participation::{self, Entity as ParticipationEntity};
        use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

        let count = ParticipationEntity::find()
            .filter(participation::Column::MatchId.eq(match_id))
            .count(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(count)
    }

    pub async fn insert(
        &self,
        user_id: uuid::Uuid,
        match_id: uuid::Uuid,
    ) -> AppResult<crate::domain::Participation> {
        use super::repositories::entities::participation::ActiveModel;
        use sea_orm::{ActiveModelTrait, Set};

        let active_model = ActiveModel {
            user_id: Set(user_id),
            match_id: Set(match_id),
            team_id: Set(None),
            validated: Set(false),
            score: Set(None),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(crate::domain::Participation::from(model))
    }
}
