//! Scores the sample lead against a running lead-scoring server.
//!
//! `LEAD_SCORING_URL` overrides the target, e.g. for a deployed instance.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_scoring::client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "lead_client=warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let url = client::predict_url();
    tracing::info!("Requesting prediction from {}", url);

    let http = reqwest::Client::new();
    let prediction = client::request_prediction(&http, &url, &client::sample_lead()).await?;

    println!("{}", client::describe(&prediction));
    println!("{}", serde_json::to_string(&prediction)?);

    Ok(())
}
