/// Lexicon-style scorer producing a compound polarity in [-1.0, 1.0].
///
/// Implementations are shared read-only across concurrent requests.
pub trait PolarityScorer: Send + Sync {
    fn name(&self) -> &'static str;
    fn compound_score(&self, text: &str) -> Result<f64, String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

/// Pre-trained classifier returning its own label and confidence.
pub trait TextClassifier: Send + Sync {
    fn name(&self) -> &'static str;
    fn classify(&self, text: &str) -> Result<Classification, String>;
}
