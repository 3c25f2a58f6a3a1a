//! Domain layer - data access contract and field registry

pub mod repository;
pub mod schema;

pub use repository::CrudRepository;
pub use schema::{EntitySchema, FieldDef};
