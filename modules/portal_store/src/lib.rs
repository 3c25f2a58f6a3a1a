//! Portal Store
//!
//! Storage layer of the corporate portal backend: SeaORM entities for users,
//! portals, departments, courses and tests, plus one generic repository that
//! gives every entity the same create/update/delete/filter contract and the
//! same error taxonomy.

// Public exports
pub mod contract;
pub use contract::{Direction, FilterQuery, Fields, Filters, OrderBy, RepositoryError};

pub mod domain;
pub use domain::{CrudRepository, EntitySchema};

pub mod api;
pub mod config;
pub mod infra;
pub mod telemetry;

pub use config::Config;
pub use infra::storage::SeaOrmRepository;
