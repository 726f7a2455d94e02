use crate::errors::ServiceError;
use crate::repositories::classifier::{PolarityScorer, TextClassifier};
use crate::value_objects::label::SentimentLabel;
use crate::value_objects::sentiment_result::{ClassificationResult, PolarityResult};
use crate::value_objects::text_input::validate_text;

/// Validates `text`, scores it and derives the label from the score's sign.
///
/// The scorer receives the untrimmed text and is never called for blank input.
pub fn analyze_polarity(
    scorer: &dyn PolarityScorer,
    text: &str,
) -> Result<PolarityResult, ServiceError> {
    validate_text(text)?;

    let score = scorer
        .compound_score(text)
        .map_err(ServiceError::Classifier)?;
    if !score.is_finite() {
        return Err(ServiceError::Classifier(format!(
            "{} returned a non-finite score: {score}",
            scorer.name()
        )));
    }

    Ok(PolarityResult {
        label: SentimentLabel::from_compound(score),
        score,
    })
}

/// Validates `text` and passes the model's label and confidence through unchanged.
pub fn analyze_classification(
    classifier: &dyn TextClassifier,
    text: &str,
) -> Result<ClassificationResult, ServiceError> {
    validate_text(text)?;

    let classification = classifier
        .classify(text)
        .map_err(ServiceError::Classifier)?;
    if classification.label.trim().is_empty() {
        return Err(ServiceError::Classifier(format!(
            "{} returned an empty label",
            classifier.name()
        )));
    }
    let confidence = classification.confidence;
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(ServiceError::Classifier(format!(
            "{} returned an invalid confidence: {confidence}",
            classifier.name()
        )));
    }

    Ok(ClassificationResult {
        sentiment: classification.label,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::{analyze_classification, analyze_polarity};
    use crate::errors::ServiceError;
    use crate::repositories::classifier::{Classification, PolarityScorer, TextClassifier};
    use crate::value_objects::label::SentimentLabel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedScorer {
        score: Result<f64, String>,
        seen: Mutex<Vec<String>>,
    }

    impl FixedScorer {
        fn new(score: Result<f64, String>) -> Self {
            Self {
                score,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl PolarityScorer for FixedScorer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn compound_score(&self, text: &str) -> Result<f64, String> {
            self.seen.lock().expect("lock").push(text.to_string());
            self.score.clone()
        }
    }

    struct FixedClassifier {
        output: Result<Classification, String>,
        calls: AtomicUsize,
    }

    impl TextClassifier for FixedClassifier {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn classify(&self, _text: &str) -> Result<Classification, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.output.clone()
        }
    }

    fn classifier(label: &str, confidence: f64) -> FixedClassifier {
        FixedClassifier {
            output: Ok(Classification {
                label: label.to_string(),
                confidence,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn polarity_passes_untrimmed_text_to_scorer() {
        let scorer = FixedScorer::new(Ok(0.5));
        let result = analyze_polarity(&scorer, "  great  ").expect("analyze");
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.score, 0.5);
        assert_eq!(*scorer.seen.lock().expect("lock"), vec!["  great  ".to_string()]);
    }

    #[test]
    fn polarity_zero_is_neutral() {
        let scorer = FixedScorer::new(Ok(0.0));
        let result = analyze_polarity(&scorer, "It is a table.").expect("analyze");
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn polarity_blank_text_skips_scorer() {
        let scorer = FixedScorer::new(Ok(0.9));
        let err = analyze_polarity(&scorer, "   ").expect_err("blank");
        assert_eq!(
            err,
            ServiceError::InvalidInput("Text input cannot be empty".to_string())
        );
        assert!(scorer.seen.lock().expect("lock").is_empty());
    }

    #[test]
    fn polarity_scorer_failure_is_classifier_error() {
        let scorer = FixedScorer::new(Err("lexicon unavailable".to_string()));
        let err = analyze_polarity(&scorer, "hello").expect_err("scorer failed");
        assert_eq!(err, ServiceError::Classifier("lexicon unavailable".to_string()));
    }

    #[test]
    fn polarity_rejects_nan_score() {
        let scorer = FixedScorer::new(Ok(f64::NAN));
        let err = analyze_polarity(&scorer, "hello").expect_err("nan");
        assert_eq!(err.kind(), "classifier");
        assert!(err.message().contains("non-finite"));
    }

    #[test]
    fn classification_returns_model_output_unchanged() {
        let model = classifier("POSITIVE", 0.9998);
        let result =
            analyze_classification(&model, "Absolutely wonderful experience").expect("analyze");
        assert_eq!(result.sentiment, "POSITIVE");
        assert_eq!(result.confidence, 0.9998);
    }

    #[test]
    fn classification_blank_text_skips_model() {
        let model = classifier("POSITIVE", 0.9);
        assert!(analyze_classification(&model, "\n\t").is_err());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn classification_rejects_out_of_range_confidence() {
        let model = classifier("POSITIVE", 1.5);
        let err = analyze_classification(&model, "ok").expect_err("confidence");
        assert!(err.message().contains("invalid confidence"));

        let model = classifier("  ", 0.5);
        let err = analyze_classification(&model, "ok").expect_err("label");
        assert!(err.message().contains("empty label"));
    }
}
