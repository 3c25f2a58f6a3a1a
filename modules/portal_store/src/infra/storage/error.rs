//! Translation of SeaORM errors into the repository taxonomy

use crate::contract::RepositoryError;
use sea_orm::{DbErr, SqlErr};

/// Classify an error raised by a write (insert or update)
///
/// Unique and foreign-key violations both become `AlreadyExists`; which
/// constraint fired is not reported.
pub(crate) fn write_error(entity: &str, err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail))
        | Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::warn!(entity, %detail, "write rejected by constraint");
            RepositoryError::AlreadyExists {
                entity: entity.to_string(),
                detail,
            }
        }
        _ => store_error(err),
    }
}

/// Any store failure that carries no finer classification
pub(crate) fn store_error(err: DbErr) -> RepositoryError {
    RepositoryError::Store {
        message: err.to_string(),
    }
}
