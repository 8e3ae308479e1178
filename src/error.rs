use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use sqlx::error::DatabaseError as _;
use thiserror::Error;
use tracing::error;

// Postgres SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::Database(DatabaseError::NotFound),
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Database(DatabaseError::Duplicate)
            }
            _ => AppError::Database(DatabaseError::QueryError(err.to_string())),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Server-side failures are logged in full; the response body only
        // carries a generic message.
        let message = if status.is_server_error() {
            error!("request failed: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(json!({ "message": message }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(DatabaseError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Database(DatabaseError::Duplicate) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No authorization token provided")]
    MissingToken,

    #[error("Invalid authorization token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record")]
    Duplicate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_conversion() {
        // Test IO error conversion
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Internal(_)));

        // Test config error conversion
        let config_err = config::ConfigError::NotFound(String::from("key not found"));
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::Config(_)));

        // Test database error conversion
        let db_err = sqlx::Error::RowNotFound;
        let app_err: AppError = db_err.into();
        assert!(matches!(app_err, AppError::Database(DatabaseError::NotFound)));
    }

    #[test]
    fn test_error_status_codes() {
        let err = AppError::Auth(AuthError::MissingToken);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::Auth(AuthError::InvalidToken);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::Validation("invalid input".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::NotFound("no such todo".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = AppError::Database(DatabaseError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = AppError::Database(DatabaseError::Duplicate);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = AppError::Database(DatabaseError::QueryError("boom".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Validation("test error".to_string());
        assert_eq!(err.to_string(), "Validation error: test error");

        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Authentication error: Invalid email or password");

        let err = AppError::Database(DatabaseError::NotFound);
        assert_eq!(err.to_string(), "Database error: Record not found");
    }
}
