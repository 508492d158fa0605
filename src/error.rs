//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid server base url: {0}")]
    InvalidBaseUrl(String),
    #[error("settings: {0}")]
    Settings(String),
}

/// Failure of a single status fetch. Never surfaced over HTTP; the overview
/// aggregator records it against the candidate and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid JSON from {url}: {reason}")]
    Parse { url: String, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("unknown column: {table}.{column}")]
    UnknownColumn { table: String, column: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::BAD_REQUEST, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::UnknownTable(_) | AppError::UnknownColumn { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "schema_error")
            }
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_client_errors() {
        let err = AppError::from(ConfigError::InvalidBaseUrl("ftp://x".into()));
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "config_error"));
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err = AppError::Db(sqlx::Error::RowNotFound);
        assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn schema_errors_are_server_errors() {
        let err = AppError::UnknownColumn {
            table: "users".into(),
            column: "nope".into(),
        };
        assert_eq!(err.status_and_code(), (StatusCode::INTERNAL_SERVER_ERROR, "schema_error"));
        assert_eq!(err.to_string(), "unknown column: users.nope");
    }

    #[test]
    fn parse_error_message_names_the_url() {
        let err = FetchError::Parse {
            url: "http://host:30120/info.json".into(),
            reason: "expected value at line 1 column 1".into(),
        };
        assert!(err.to_string().contains("http://host:30120/info.json"));
    }
}
