//! Lead Scoring Service
//!
//! Serves a pre-trained lead-conversion classifier over HTTP.
//!
//! ```text
//! POST /predict ──► AppJson<Customer> ──► Record ──► Pipeline ──► threshold ──► PredictResponse
//!                        │ 4xx on schema violation          (shared, read-only)
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod logic;
pub mod models;

use std::sync::Arc;

use axum::{routing::post, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};
use logic::model::Classifier;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub model: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(model: impl Classifier + 'static) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict::predict))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
