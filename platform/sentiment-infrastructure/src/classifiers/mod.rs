pub mod remote;
pub mod vader;

use std::time::Instant;

pub(crate) fn record_classifier_metrics<T>(
    backend: &'static str,
    start: Instant,
    result: &Result<T, String>,
) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "sentiment.infra.classifier.calls_total",
        "backend" => backend,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!(
        "sentiment.infra.classifier.call_ms",
        "backend" => backend,
        "result" => result_label
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}
