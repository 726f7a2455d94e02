use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Label from the sign of a compound polarity score. Exactly zero is neutral.
    pub fn from_compound(score: f64) -> Self {
        if score > 0.0 {
            SentimentLabel::Positive
        } else if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::SentimentLabel;

    #[test]
    fn from_compound_follows_sign() {
        assert_eq!(SentimentLabel::from_compound(0.6369), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(-0.4767), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_compound(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_compound(-0.0), SentimentLabel::Neutral);
        assert_eq!(
            SentimentLabel::from_compound(f64::MIN_POSITIVE),
            SentimentLabel::Positive
        );
    }

    #[test]
    fn serializes_uppercase() {
        let json = serde_json::to_string(&SentimentLabel::Neutral).expect("json");
        assert_eq!(json, "\"NEUTRAL\"");
        let parsed: SentimentLabel = serde_json::from_str("\"NEGATIVE\"").expect("parse");
        assert_eq!(parsed, SentimentLabel::Negative);
    }
}
