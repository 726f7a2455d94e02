use proptest::prelude::*;
use sentiment_domain::errors::ServiceError;
use sentiment_domain::repositories::classifier::PolarityScorer;
use sentiment_domain::services::analysis::analyze_polarity;
use sentiment_domain::value_objects::label::SentimentLabel;
use std::sync::atomic::{AtomicUsize, Ordering};

struct ConstantScorer {
    score: f64,
    calls: AtomicUsize,
}

impl ConstantScorer {
    fn new(score: f64) -> Self {
        Self {
            score,
            calls: AtomicUsize::new(0),
        }
    }
}

impl PolarityScorer for ConstantScorer {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn compound_score(&self, _text: &str) -> Result<f64, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.score)
    }
}

/// Deterministic stand-in for a lexicon: score depends only on the text.
struct LengthScorer;

impl PolarityScorer for LengthScorer {
    fn name(&self) -> &'static str {
        "length"
    }

    fn compound_score(&self, text: &str) -> Result<f64, String> {
        let n = text.chars().filter(|c| !c.is_whitespace()).count() as f64;
        Ok(((n % 21.0) - 10.0) / 10.0)
    }
}

fn blank_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![' ', '\t', '\n', '\r', '\u{a0}', '\u{2003}', '\u{3000}']),
        0..32,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn label_matches_score_sign(score in -1.0f64..=1.0, text in "[a-zA-Z ]{0,20}[a-zA-Z][a-zA-Z ]{0,20}") {
        let scorer = ConstantScorer::new(score);
        let result = analyze_polarity(&scorer, &text).expect("non-blank text");
        let expected = if score > 0.0 {
            SentimentLabel::Positive
        } else if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        prop_assert_eq!(result.label, expected);
        prop_assert_eq!(result.score, score);
    }

    #[test]
    fn blank_text_never_reaches_scorer(text in blank_text()) {
        let scorer = ConstantScorer::new(0.5);
        let err = analyze_polarity(&scorer, &text).expect_err("blank text");
        prop_assert!(matches!(err, ServiceError::InvalidInput(_)));
        prop_assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn analyze_is_idempotent(text in "\\PC{1,64}") {
        prop_assume!(!text.trim().is_empty());
        let first = analyze_polarity(&LengthScorer, &text).expect("first");
        let second = analyze_polarity(&LengthScorer, &text).expect("second");
        prop_assert_eq!(first, second);
    }
}
