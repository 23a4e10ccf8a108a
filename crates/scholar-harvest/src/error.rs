//! Error types for the harvester.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use crate::models::Source;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by a metadata API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response body arrived but did not have the expected shape
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// A source payload whose top-level structure is not what the extractor expects.
///
/// Individual bad candidates never produce this error; they are skipped.
#[derive(thiserror::Error, Debug)]
pub enum NormalizeError {
    /// Root object, item list or document list is missing or has the wrong type.
    #[error("Malformed {origin} payload: {message}")]
    MalformedPayload {
        /// Source the payload claims to come from
        origin: Source,
        /// What was wrong with it
        message: String,
    },

    /// The arXiv Atom feed is not well-formed XML.
    #[error("Malformed arXiv feed: {0}")]
    Xml(String),
}

impl NormalizeError {
    /// Create a malformed payload error.
    #[must_use]
    pub fn malformed(origin: Source, message: impl Into<String>) -> Self {
        Self::MalformedPayload { origin, message: message.into() }
    }
}

impl From<quick_xml::Error> for NormalizeError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

/// Errors from the local record store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// SQLite error
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Errors from rendering an export.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer produced non UTF-8 output
    #[error("Export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// CSV writer could not be flushed into its buffer
    #[error("Failed to finish export buffer: {0}")]
    Buffer(String),
}

/// Umbrella error for library callers that drive the whole pipeline.
#[derive(thiserror::Error, Debug)]
pub enum HarvestError {
    /// Error from the API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Error from payload normalization
    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Error from the record store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from an exporter
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },
}

impl HarvestError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Convert to a user-friendly error message for the command line.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::RateLimited { retry_after }) => {
                format!("Rate limited by the metadata API. Please wait {retry_after:?} before retrying.")
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for payload normalization.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for exporters.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type alias for whole-pipeline operations.
pub type HarvestResult<T> = Result<T, HarvestError>;
