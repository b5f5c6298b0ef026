//! Error types for the bookstore server
//!
//! Services raise [`DomainError`]; the HTTP layer translates each one exactly
//! once through [`ErrorTranslator`] into a status code and an [`ErrorEnvelope`].

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Raised when no book matches the requested isbn
pub const UNKNOWN_BOOK: &str = "unknown.book";
/// Raised when a request body cannot be decoded
pub const INVALID_REQUEST: &str = "invalid.request";
/// Raised when the store collaborator fails
pub const STORE_FAILURE: &str = "store.failure";
/// Substituted for an empty message id
pub const UNCLASSIFIED: &str = "unclassified.error";

/// Header carrying the correlation id in both directions
pub const DEBUG_ID_HEADER: &str = "x-debug-id";

/// Fresh system-generated correlation id
pub fn new_debug_id() -> String {
    Uuid::new_v4().to_string()
}

/// Typed failure raised by business operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message_id}: {message} (debug id {debug_id})")]
pub struct DomainError {
    pub message: String,
    pub message_id: String,
    pub debug_id: String,
}

impl DomainError {
    /// Create an error with a system-generated debug id
    pub fn new(message_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            message_id: message_id.into(),
            debug_id: new_debug_id(),
        }
    }

    pub fn unknown_book(isbn: &str) -> Self {
        Self::new(UNKNOWN_BOOK, format!("Cannot find the book with isbn {}!", isbn))
    }

    /// Replace the debug id, e.g. with one supplied by the caller
    pub fn with_debug_id(mut self, debug_id: impl Into<String>) -> Self {
        self.debug_id = debug_id.into();
        self
    }
}

/// Failures reported by a book store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Record rejected by store: {0}")]
    Rejected(String),
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Stable machine-readable code, e.g. `unknown.book`
    pub message_id: String,
    /// Correlation token of the failure
    pub debug_id: String,
    /// Human-readable description
    pub message: String,
}

impl From<DomainError> for ErrorEnvelope {
    fn from(error: DomainError) -> Self {
        let message_id = if error.message_id.is_empty() {
            UNCLASSIFIED.to_string()
        } else {
            error.message_id
        };
        Self {
            message_id,
            debug_id: error.debug_id,
            message: error.message,
        }
    }
}

/// Which message ids a translation rule applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageIdRule {
    Exact(String),
    Prefix(String),
}

impl MessageIdRule {
    pub fn matches(&self, message_id: &str) -> bool {
        match self {
            MessageIdRule::Exact(id) => message_id == id,
            MessageIdRule::Prefix(prefix) => message_id.starts_with(prefix.as_str()),
        }
    }
}

/// Maps domain errors to HTTP status codes.
///
/// Rules are checked in insertion order and the first match wins. Message
/// ids no rule matches fall back to `500 Internal Server Error`, so every
/// domain error leaves the server as a structured envelope.
#[derive(Debug, Clone)]
pub struct ErrorTranslator {
    rules: Vec<(MessageIdRule, StatusCode)>,
    fallback: StatusCode,
}

impl Default for ErrorTranslator {
    fn default() -> Self {
        Self::empty().with_rule(MessageIdRule::Prefix("unknown.".to_string()), StatusCode::NOT_FOUND)
    }
}

impl ErrorTranslator {
    /// Translator mapping everything to the fallback status
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            fallback: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn with_rule(mut self, rule: MessageIdRule, status: StatusCode) -> Self {
        self.rules.push((rule, status));
        self
    }

    pub fn status_for(&self, message_id: &str) -> StatusCode {
        self.rules
            .iter()
            .find(|(rule, _)| rule.matches(message_id))
            .map(|(_, status)| *status)
            .unwrap_or(self.fallback)
    }

    pub fn translate(&self, error: DomainError) -> ApiError {
        let status = self.status_for(&error.message_id);
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", error);
        } else {
            tracing::debug!(status = status.as_u16(), "Request rejected: {}", error);
        }
        ApiError {
            status,
            envelope: error.into(),
        }
    }
}

/// Failure leaving the HTTP boundary
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub envelope: ErrorEnvelope,
}

impl ApiError {
    /// Body could not be decoded into the expected payload
    pub fn malformed(debug_id: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        let debug_id = debug_id.into();
        tracing::debug!(debug_id = %debug_id, "Malformed request: {}", detail);
        Self {
            status: StatusCode::BAD_REQUEST,
            envelope: ErrorEnvelope {
                message_id: INVALID_REQUEST.to_string(),
                debug_id,
                message: detail.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let header = HeaderValue::from_str(&self.envelope.debug_id).ok();
        let mut response = (self.status, Json(self.envelope)).into_response();
        if let Some(value) = header {
            response.headers_mut().insert(DEBUG_ID_HEADER, value);
        }
        response
    }
}

/// Result type alias for business operations
pub type AppResult<T> = Result<T, DomainError>;
