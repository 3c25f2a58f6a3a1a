//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// Problem for `status`, typed by its status page URI
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// Attach the occurrence-specific explanation
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<RepositoryError> for Problem {
    fn from(error: RepositoryError) -> Self {
        map_repository_error(error)
    }
}

impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        map_repository_error(self).into_response()
    }
}

/// Map repository errors to HTTP Problem Details
pub fn map_repository_error(error: RepositoryError) -> Problem {
    match error {
        RepositoryError::AlreadyExists { .. } => {
            Problem::new(StatusCode::CONFLICT, "Already Exists").with_detail(error.to_string())
        }

        RepositoryError::NotFound { .. } => {
            Problem::new(StatusCode::NOT_FOUND, "Not Found").with_detail(error.to_string())
        }

        RepositoryError::AmbiguousResult { .. } => {
            Problem::new(StatusCode::CONFLICT, "Ambiguous Result").with_detail(error.to_string())
        }

        RepositoryError::EmptyChangeSet { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Empty Change Set").with_detail(error.to_string())
        }

        RepositoryError::UnknownField { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Unknown Field").with_detail(error.to_string())
        }

        RepositoryError::Store { message } => {
            tracing::error!(%message, "store error");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let problem = map_repository_error(RepositoryError::NotFound {
            entity: "users_user".to_string(),
            filters: r#"email="nobody@corp.example""#.to_string(),
        });

        assert_eq!(problem.status, 404);
        assert_eq!(problem.type_uri, "https://httpstatuses.io/404");
        assert!(problem.detail.unwrap().contains("users_user"));
    }

    #[test]
    fn constraint_violation_maps_to_409() {
        let problem = map_repository_error(RepositoryError::AlreadyExists {
            entity: "portals_department".to_string(),
            detail: "FOREIGN KEY constraint failed".to_string(),
        });

        assert_eq!(problem.status, 409);
    }

    #[test]
    fn caller_mistakes_map_to_400() {
        let empty = map_repository_error(RepositoryError::EmptyChangeSet {
            entity: "users_user".to_string(),
        });
        let unknown = map_repository_error(RepositoryError::UnknownField {
            entity: "users_user".to_string(),
            field: "nickname".to_string(),
        });

        assert_eq!(empty.status, 400);
        assert_eq!(unknown.status, 400);
        assert!(unknown.detail.unwrap().contains("nickname"));
    }

    #[test]
    fn store_errors_do_not_leak_their_message() {
        let problem = map_repository_error(RepositoryError::Store {
            message: "connection refused on 10.0.0.5:5432".to_string(),
        });

        assert_eq!(problem.status, 500);
        assert_eq!(problem.detail.as_deref(), Some("An unexpected error occurred"));
    }

    #[test]
    fn problem_converts_from_repository_error() {
        let problem: Problem = RepositoryError::EmptyChangeSet {
            entity: "portals_portal".to_string(),
        }
        .into();

        assert_eq!(problem.status, 400);
        assert_eq!(problem.title, "Empty Change Set");
    }

    #[test]
    fn repository_error_renders_as_response() {
        let response = RepositoryError::AmbiguousResult {
            entity: "portals_department".to_string(),
            filters: r#"name="Sales""#.to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
