//! Contract layer - public types of the repository layer
//!
//! Error taxonomy and query inputs shared by every entity binding.

pub mod error;
pub mod query;

pub use error::RepositoryError;
pub use query::{Direction, FilterQuery, Fields, Filters, OrderBy};
