//! Bookstore catalog server
//!
//! A REST JSON API for looking up, adding and removing books, with every
//! failure reported as a structured error envelope.

use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppResult, DomainError, ErrorTranslator};

use repository::BookStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    pub errors: Arc<ErrorTranslator>,
}

impl AppState {
    /// Wire services on top of a store, with the default error policy
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            services: Arc::new(services::Services::new(store)),
            errors: Arc::new(ErrorTranslator::default()),
        }
    }
}

/// Create the application router with all routes
pub fn app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api::router(state))
        .merge(api::openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
