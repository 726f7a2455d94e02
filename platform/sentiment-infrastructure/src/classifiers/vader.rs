use super::record_classifier_metrics;
use sentiment_domain::repositories::classifier::PolarityScorer;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use vader_sentiment::SentimentIntensityAnalyzer;

const BACKEND: &str = "vader";
const COMPOUND_SCALE: f64 = 10_000.0;

/// VADER lexicon scorer. The lexicon is loaded once, at construction, and
/// only read afterwards.
pub struct VaderPolarityScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderPolarityScorer {
    pub fn new() -> Self {
        let analyzer = SentimentIntensityAnalyzer::new();
        tracing::info!(backend = BACKEND, "lexicon polarity scorer loaded");
        Self { analyzer }
    }

    fn score(&self, text: &str) -> Result<f64, String> {
        let compound = panic::catch_unwind(AssertUnwindSafe(|| {
            self.analyzer.polarity_scores(text).get("compound").copied()
        }))
        .map_err(|payload| {
            format!(
                "lexicon scorer panicked: {}",
                panic_message(payload.as_ref())
            )
        })?;

        compound
            .map(round_compound)
            .ok_or_else(|| "lexicon scorer returned no compound score".to_string())
    }
}

impl Default for VaderPolarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for VaderPolarityScorer {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn compound_score(&self, text: &str) -> Result<f64, String> {
        let start = Instant::now();
        let result = self.score(text);
        record_classifier_metrics(BACKEND, start, &result);
        result
    }
}

/// Compound scores are reported with four decimals; the label is taken from the
/// rounded value, so float residue from cancelling lexicon terms reads as 0.0.
fn round_compound(compound: f64) -> f64 {
    let rounded = (compound * COMPOUND_SCALE).round() / COMPOUND_SCALE;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "unknown panic".to_string()
}

#[cfg(test)]
mod tests {
    use super::{round_compound, VaderPolarityScorer};
    use sentiment_domain::repositories::classifier::PolarityScorer;

    #[test]
    fn positive_text_scores_above_zero() {
        let scorer = VaderPolarityScorer::new();
        let score = scorer.compound_score("I love this product!").expect("score");
        assert!(score > 0.0, "score={score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn negative_text_scores_below_zero() {
        let scorer = VaderPolarityScorer::new();
        let score = scorer.compound_score("This is terrible.").expect("score");
        assert!(score < 0.0, "score={score}");
        assert!(score >= -1.0);
    }

    #[test]
    fn text_without_lexicon_words_scores_zero() {
        let scorer = VaderPolarityScorer::new();
        let score = scorer.compound_score("It is a table.").expect("score");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn compound_is_rounded_to_four_decimals() {
        let scorer = VaderPolarityScorer::new();
        let score = scorer.compound_score("I love this product!").expect("score");
        assert_eq!(score, 0.6696);
    }

    #[test]
    fn cancelling_lexicon_terms_score_exactly_zero() {
        let scorer = VaderPolarityScorer::new();
        let score = scorer
            .compound_score("aboard affronted accidental")
            .expect("score");
        assert_eq!(score, 0.0);
        assert!(score.is_sign_positive());
    }

    #[test]
    fn rounding_keeps_sign_and_drops_residue() {
        assert_eq!(round_compound(1.4332917616497526e-17), 0.0);
        assert_eq!(round_compound(-0.000_04), 0.0);
        assert!(round_compound(-0.000_04).is_sign_positive());
        assert_eq!(round_compound(-0.476_71), -0.4767);
        assert_eq!(round_compound(0.999_96), 1.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let scorer = VaderPolarityScorer::new();
        let a = scorer.compound_score("Not bad at all, quite good").expect("a");
        let b = scorer.compound_score("Not bad at all, quite good").expect("b");
        assert_eq!(a, b);
    }

    #[test]
    fn scorer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VaderPolarityScorer>();
    }
}
