use sentiment_domain::errors::ServiceError;
use sentiment_domain::repositories::classifier::{PolarityScorer, TextClassifier};
use sentiment_domain::services::analysis::{analyze_classification, analyze_polarity};
use sentiment_domain::value_objects::contract::Contract;
use sentiment_domain::value_objects::sentiment_result::SentimentResult;
use std::time::Instant;

/// Classifier handle bound at startup. The variant fixes the response contract.
pub enum ClassifierHandle {
    Polarity(Box<dyn PolarityScorer>),
    Classification(Box<dyn TextClassifier>),
}

/// Sentiment endpoint use case: validation, classifier dispatch and result
/// shaping for one configured contract.
///
/// Holds no per-request state, so a single instance serves every request
/// concurrently.
pub struct SentimentService {
    classifier: ClassifierHandle,
}

impl SentimentService {
    pub fn new(classifier: ClassifierHandle) -> Self {
        Self { classifier }
    }

    pub fn polarity(scorer: Box<dyn PolarityScorer>) -> Self {
        Self::new(ClassifierHandle::Polarity(scorer))
    }

    pub fn classification(classifier: Box<dyn TextClassifier>) -> Self {
        Self::new(ClassifierHandle::Classification(classifier))
    }

    pub fn contract(&self) -> Contract {
        match self.classifier {
            ClassifierHandle::Polarity(_) => Contract::Polarity,
            ClassifierHandle::Classification(_) => Contract::Classification,
        }
    }

    pub fn classifier_name(&self) -> &'static str {
        match &self.classifier {
            ClassifierHandle::Polarity(scorer) => scorer.name(),
            ClassifierHandle::Classification(classifier) => classifier.name(),
        }
    }

    pub fn analyze(&self, text: &str) -> Result<SentimentResult, ServiceError> {
        let contract = self.contract();
        let span = tracing::info_span!(
            "application.analyze",
            contract = contract.as_str(),
            classifier = self.classifier_name(),
            text_chars = text.chars().count()
        );
        let _enter = span.enter();

        let start = Instant::now();
        let result = match &self.classifier {
            ClassifierHandle::Polarity(scorer) => {
                analyze_polarity(scorer.as_ref(), text).map(SentimentResult::Polarity)
            }
            ClassifierHandle::Classification(classifier) => {
                analyze_classification(classifier.as_ref(), text)
                    .map(SentimentResult::Classification)
            }
        };
        record_analyze_metrics(contract, start, &result);

        match &result {
            Ok(output) => tracing::debug!(label = output.label(), "sentiment analyzed"),
            Err(err @ ServiceError::InvalidInput(_)) => {
                tracing::debug!(error = %err, "rejected analysis input")
            }
            Err(err) => tracing::warn!(error = %err, "sentiment analysis failed"),
        }

        result
    }
}

fn record_analyze_metrics(
    contract: Contract,
    start: Instant,
    result: &Result<SentimentResult, ServiceError>,
) {
    let result_label = match result {
        Ok(_) => "ok",
        Err(err) => err.kind(),
    };
    metrics::counter!(
        "sentiment.app.analyze.calls_total",
        "contract" => contract.as_str(),
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("sentiment.app.analyze_ms", "contract" => contract.as_str())
        .record(start.elapsed().as_secs_f64() * 1000.0);
}
