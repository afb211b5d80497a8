//! Prediction response model

use serde::{Deserialize, Serialize};

use crate::logic::model::decide;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub conversion_probability: f64,
    pub convert: bool,
}

impl PredictResponse {
    pub fn from_probability(conversion_probability: f64) -> Self {
        Self {
            conversion_probability,
            convert: decide(conversion_probability),
        }
    }
}
