//! Lead scoring server binary
//!
//! The model artifact path `pipeline_v1.json` is relative to the working
//! directory, so start the server from the `lead-scoring/` directory:
//!
//! ```text
//! cd lead-scoring && cargo run --bin lead-scoring
//! ```

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_scoring::{config::Config, create_router, logic::model::Pipeline, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "lead_scoring=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::default();
    tracing::info!("Lead scoring service starting...");

    // Startup fails without a usable artifact
    let pipeline = Pipeline::load(&config.model_path).with_context(|| {
        format!("Failed to load model artifact {}", config.model_path.display())
    })?;

    let app = create_router(AppState::new(pipeline));

    let addr = config.socket_addr();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
