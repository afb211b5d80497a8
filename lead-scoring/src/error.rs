//! Error handling

use axum::{
    extract::rejection::{BytesRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::logic::model::ModelError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Request body did not match the schema
    #[error(transparent)]
    InvalidPayload(#[from] JsonRejection),

    // Request body could not be read
    #[error(transparent)]
    UnreadableBody(#[from] BytesRejection),

    // Model failed while scoring a valid request
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidPayload(rejection) => {
                tracing::debug!("Rejected payload: {}", rejection.body_text());
                (rejection.status(), rejection.body_text())
            }
            AppError::UnreadableBody(rejection) => {
                tracing::debug!("Unreadable body: {}", rejection.body_text());
                (rejection.status(), rejection.body_text())
            }
            AppError::Model(err) => {
                tracing::error!("Prediction error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
