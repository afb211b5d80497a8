//! Customer (lead) model

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::logic::model::{FeatureValue, Record};

/// Channel the lead arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    OrganicSearch,
    Ads,
    Referral,
    SocialMedia,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::OrganicSearch => "organic_search",
            LeadSource::Ads => "ads",
            LeadSource::Referral => "referral",
            LeadSource::SocialMedia => "social_media",
        }
    }
}

/// A lead to score. Every field is required and unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Customer {
    pub lead_source: LeadSource,
    #[serde(deserialize_with = "integral")]
    pub number_of_courses_viewed: i64,
    pub annual_income: f64,
}

/// Integer field that also takes floats with no fractional part (`5.0`).
fn integral<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(i) = number.as_i64() {
        return Ok(i);
    }

    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(de::Error::custom(format!("expected an integer, got {}", number))),
    }
}

impl Customer {
    /// Attribute mapping in the shape the vectorizer was fitted on.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            "lead_source".to_string(),
            FeatureValue::Category(self.lead_source.as_str().to_string()),
        );
        record.insert(
            "number_of_courses_viewed".to_string(),
            FeatureValue::Number(self.number_of_courses_viewed as f64),
        );
        record.insert(
            "annual_income".to_string(),
            FeatureValue::Number(self.annual_income),
        );
        record
    }
}
