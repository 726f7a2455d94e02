use serde::{Deserialize, Serialize};

/// Response contract exposed by a deployment. Exactly one is active at a time;
/// the two shapes are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contract {
    /// Compound polarity score with a sign-derived label:
    /// `{"label": "POSITIVE" | "NEGATIVE" | "NEUTRAL", "score": f64}`.
    Polarity,
    /// Label and confidence straight from a pre-trained model:
    /// `{"sentiment": String, "confidence": f64}`.
    Classification,
}

impl Contract {
    pub fn as_str(&self) -> &'static str {
        match self {
            Contract::Polarity => "polarity",
            Contract::Classification => "classification",
        }
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
