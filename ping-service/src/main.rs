//! Ping Service
//!
//! Standalone liveness probe. Shares nothing with the lead-scoring service
//! except the port convention.

mod config;
mod handlers;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "ping_service=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::default();
    let app = create_router();

    let addr = config.socket_addr();
    tracing::info!("Ping service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router() -> Router {
    Router::new()
        .route("/ping", get(handlers::ping::ping))
        .layer(TraceLayer::new_for_http())
}
