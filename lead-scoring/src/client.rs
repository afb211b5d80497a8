//! Client for the prediction endpoint, used by `lead-client`.

use anyhow::Context;

use crate::models::{Customer, LeadSource, PredictResponse};

/// Where the server listens when run locally
pub const DEFAULT_PREDICT_URL: &str = "http://localhost:9696/predict";

/// Get the prediction URL from `LEAD_SCORING_URL` or use the default
pub fn predict_url() -> String {
    std::env::var("LEAD_SCORING_URL").unwrap_or_else(|_| DEFAULT_PREDICT_URL.to_string())
}

/// The lead the client scores when run without changes.
pub fn sample_lead() -> Customer {
    Customer {
        lead_source: LeadSource::Referral,
        number_of_courses_viewed: 5,
        annual_income: 50000.0,
    }
}

/// POST `customer` to `url` and decode the prediction.
pub async fn request_prediction(
    client: &reqwest::Client,
    url: &str,
    customer: &Customer,
) -> anyhow::Result<PredictResponse> {
    let response = client
        .post(url)
        .json(customer)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()
        .context("Prediction request rejected")?;

    let prediction = response
        .json::<PredictResponse>()
        .await
        .context("Malformed prediction response")?;

    Ok(prediction)
}

/// Action line printed for a prediction.
pub fn describe(prediction: &PredictResponse) -> &'static str {
    if prediction.convert {
        "lead is likely to convert, reach out"
    } else {
        "lead is not likely to convert"
    }
}
