//! Repository trait for data access
//!
//! One capability set for every entity type. The SeaORM implementation lives
//! in infra/storage/repository.rs and is bound to an entity per instance.

use crate::contract::{FilterQuery, Fields, Filters, RepositoryError};
use async_trait::async_trait;

/// Generic CRUD capability set
#[async_trait]
pub trait CrudRepository: Send + Sync {
    /// Record type returned by reads and writes
    type Record: Send;

    /// Insert one record built from `data`
    async fn create(&self, data: Fields) -> Result<Self::Record, RepositoryError>;

    /// Insert several records; either all of them are stored or none
    async fn bulk_create(&self, data: Vec<Fields>) -> Result<Vec<Self::Record>, RepositoryError>;

    /// Apply `data` to the single record selected by `filters`
    async fn update(
        &self,
        data: Fields,
        filters: Option<Filters>,
    ) -> Result<Self::Record, RepositoryError>;

    /// Delete every record matching `filters`; matching nothing is an error
    async fn delete(&self, filters: Filters) -> Result<(), RepositoryError>;

    /// Records matching the query, possibly none
    async fn filter(&self, query: FilterQuery) -> Result<Vec<Self::Record>, RepositoryError>;

    /// Same as `filter`, fetching only `fields` and returning JSON rows
    async fn filter_fields(
        &self,
        query: FilterQuery,
        fields: &[&str],
    ) -> Result<Vec<serde_json::Value>, RepositoryError>;

    /// Exactly one record matching `filters`
    async fn get_one(&self, filters: Filters) -> Result<Self::Record, RepositoryError>;

    async fn exists(&self, filters: Filters) -> Result<bool, RepositoryError>;

    async fn count(&self, filters: Filters) -> Result<u64, RepositoryError>;

    /// Every record of the entity
    async fn all(&self) -> Result<Vec<Self::Record>, RepositoryError> {
        self.filter(FilterQuery::default()).await
    }
}
