//! Error types for foli
//!
//! This module provides the error taxonomy for the whole crate:
//! - Domain-specific error types (data mapping, database)
//! - HTTP status code mapping for the query service
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for foli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for foli
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key (environment variable) that caused the error
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Upstream payload could not be turned into a record
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// HTTP call to the upstream API or image host failed
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Client sent a query body that could not be parsed
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// Errors raised while walking the upstream payloads and mapping them into a record
#[derive(Debug, Error)]
pub enum DataError {
    /// An upstream list that the next stage depends on came back empty
    #[error("upstream list was empty: {list}")]
    EmptyUpstreamList {
        /// Name of the list (e.g. "creatives_to_follow")
        list: String,
    },

    /// The project has no cover under the expected key
    #[error("project has no \"{key}\" cover source")]
    MissingSource {
        /// The covers key that was looked up
        key: String,
    },

    /// The cover source exists but is not a string URL
    #[error("cover source \"{key}\" is a {found}, expected a string")]
    SourceType {
        /// The covers key that was looked up
        key: String,
        /// JSON type name that was found instead
        found: String,
    },

    /// A filename could not be derived from the source URL
    #[error("invalid url {url:?}: no path segment to use as filename")]
    MalformedUrl {
        /// The offending URL
        url: String,
    },
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "database_error",
///     "message": "database error: query failed: ...",
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "database_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::InvalidQuery(_) => 400,

            // 422 Unprocessable Entity - upstream data did not fit
            Error::Data(_) => 422,

            // 500 Internal Server Error - Server-side issues
            Error::Database(_) => 500,
            Error::Sqlx(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,

            // 502 Bad Gateway - External service errors
            Error::Network(_) => 502,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Database(_) => "database_error",
            Error::Sqlx(_) => "database_error",
            Error::Data(e) => match e {
                DataError::EmptyUpstreamList { .. } => "empty_upstream_list",
                DataError::MissingSource { .. } => "missing_source",
                DataError::SourceType { .. } => "source_type",
                DataError::MalformedUrl { .. } => "malformed_url",
            },
            Error::Network(_) => "network_error",
            Error::InvalidQuery(_) => "invalid_query",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({ "key": key })),
            Error::Data(DataError::EmptyUpstreamList { list }) => {
                Some(serde_json::json!({ "list": list }))
            }
            Error::Data(DataError::SourceType { key, found }) => Some(serde_json::json!({
                "key": key,
                "found": found,
            })),
            Error::Data(DataError::MalformedUrl { url }) => Some(serde_json::json!({ "url": url })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
