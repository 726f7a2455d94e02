use crate::value_objects::label::SentimentLabel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Polarity contract response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolarityResult {
    pub label: SentimentLabel,
    /// Compound polarity in [-1.0, 1.0].
    pub score: f64,
}

/// Classification contract response body. The label vocabulary belongs to the
/// model and may lack a neutral class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationResult {
    pub sentiment: String,
    /// Model confidence in [0.0, 1.0], independent of valence.
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SentimentResult {
    Polarity(PolarityResult),
    Classification(ClassificationResult),
}

impl SentimentResult {
    pub fn label(&self) -> &str {
        match self {
            SentimentResult::Polarity(result) => result.label.as_str(),
            SentimentResult::Classification(result) => result.sentiment.as_str(),
        }
    }
}
