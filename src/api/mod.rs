//! API handlers for the bookstore REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{request::Parts, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;

use crate::{
    error::{new_debug_id, ApiError, DomainError, DEBUG_ID_HEADER},
    AppState,
};

/// Build the API router (without the version prefix)
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/books", post(books::create_book))
        .route("/books/:isbn", get(books::get_book).delete(books::delete_book))
        .with_state(state)
}

fn caller_debug_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(DEBUG_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Correlation id the caller sent in `x-debug-id`, if any
#[derive(Debug, Clone, Default)]
pub struct DebugId(pub Option<String>);

impl DebugId {
    /// Stamp the caller's id onto a raised error
    pub fn apply(&self, error: DomainError) -> DomainError {
        match &self.0 {
            Some(id) => error.with_debug_id(id.clone()),
            None => error,
        }
    }

    pub fn or_generate(&self) -> String {
        self.0.clone().unwrap_or_else(new_debug_id)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for DebugId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(DebugId(caller_debug_id(&parts.headers)))
    }
}

/// JSON body extractor that reports decode failures as `invalid.request`
/// envelopes, so a malformed body never reaches a handler.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let debug_id = DebugId(caller_debug_id(req.headers()));
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::malformed(debug_id.or_generate(), rejection.body_text())),
        }
    }
}

impl AppState {
    /// Single translation step from a domain failure to an HTTP error
    pub fn reject(&self, debug_id: &DebugId, error: DomainError) -> ApiError {
        self.errors.translate(debug_id.apply(error))
    }
}
