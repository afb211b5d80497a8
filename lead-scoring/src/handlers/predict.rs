//! Prediction handler

use axum::{extract::State, Json};

use crate::extract::AppJson;
use crate::logic::model::Classifier;
use crate::models::{Customer, PredictResponse};
use crate::{AppResult, AppState};

/// Score one lead
pub async fn predict(
    State(state): State<AppState>,
    AppJson(customer): AppJson<Customer>,
) -> AppResult<Json<PredictResponse>> {
    let probability = state.model.predict_proba(&customer.to_record())?;
    let response = PredictResponse::from_probability(probability);

    tracing::debug!(
        lead_source = customer.lead_source.as_str(),
        probability,
        convert = response.convert,
        "Lead scored"
    );

    Ok(Json(response))
}
