//! Contract error types for the repository layer
//!
//! These errors are transport-agnostic; the REST layer maps them to problem
//! responses in `api::rest::error`.

use thiserror::Error;

/// Repository errors, one taxonomy for every entity type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A uniqueness or foreign-key constraint rejected the write
    #[error("object {entity} already exists or references a missing related record: {detail}")]
    AlreadyExists {
        /// Table of the bound entity
        entity: String,
        /// Message reported by the store
        detail: String,
    },

    /// Lookup, update or delete matched zero records
    #[error("no {entity} found for filters [{filters}]")]
    NotFound { entity: String, filters: String },

    /// Single-result lookup matched more than one record
    #[error("more than one {entity} found for filters [{filters}]")]
    AmbiguousResult { entity: String, filters: String },

    /// Update called without any field to change
    #[error("empty change set passed to update of {entity}")]
    EmptyChangeSet { entity: String },

    /// A field name is not part of the entity
    #[error("field `{field}` does not exist in {entity}")]
    UnknownField { entity: String, field: String },

    /// Any other store failure, with the original message
    #[error("store error: {message}")]
    Store { message: String },
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}
