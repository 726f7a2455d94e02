use super::record_classifier_metrics;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use sentiment_domain::repositories::classifier::{Classification, TextClassifier};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const BACKEND: &str = "remote";
const MAX_LABEL_LEN: usize = 256;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Text-classification inference responses come nested per input, flat, or as
/// a single object depending on the server.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Single(LabelScore),
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

/// Client for a hosted pre-trained sentiment model speaking the Hugging Face
/// text-classification JSON format (`{"inputs": text}` in, label/score pairs out).
///
/// Every call is a single attempt; failures are reported, never retried.
pub struct RemoteTextClassifier {
    pub url: String,
    pub timeout_ms: u64,
    headers: HeaderMap,
    client: Client,
}

impl RemoteTextClassifier {
    pub fn new(url: String, timeout_ms: u64) -> Result<Self, String> {
        Self::new_with_token(url, timeout_ms, None)
    }

    pub fn new_with_token(
        url: String,
        timeout_ms: u64,
        api_token: Option<String>,
    ) -> Result<Self, String> {
        let mut headers = HeaderMap::new();
        if let Some(token) = api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| "invalid classifier api token".to_string())?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|err| format!("failed to build http client: {err}"))?;
        Ok(Self {
            url,
            timeout_ms,
            headers,
            client,
        })
    }

    fn send(&self, text: &str) -> Result<Classification, String> {
        let mut builder = self.client.post(&self.url);
        if !self.headers.is_empty() {
            builder = builder.headers(self.headers.clone());
        }
        let resp = builder
            .json(&InferenceRequest { inputs: text })
            .send()
            .map_err(|err| format!("classifier request failed: {err}"))?;

        if resp.status() != StatusCode::OK {
            let code = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            return Err(match serde_json::from_str::<InferenceError>(&body) {
                Ok(parsed) => {
                    format!("classifier http error: status {code}: {}", parsed.error)
                }
                Err(_) => format!("classifier http error: status {code}"),
            });
        }

        let parsed = resp
            .json::<InferenceResponse>()
            .map_err(|err| format!("failed to parse classifier response: {err}"))?;
        let best = top_label(parsed)?;
        validate_label_score(&best)?;
        Ok(Classification {
            label: best.label,
            confidence: best.score,
        })
    }
}

fn top_label(response: InferenceResponse) -> Result<LabelScore, String> {
    let candidates = match response {
        InferenceResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        InferenceResponse::Flat(items) => items,
        InferenceResponse::Single(item) => vec![item],
    };
    candidates
        .into_iter()
        .filter(|c| c.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| "classifier returned no labels".to_string())
}

fn validate_label_score(item: &LabelScore) -> Result<(), String> {
    if item.label.trim().is_empty() {
        return Err("invalid label: empty".to_string());
    }
    if item.label.len() > MAX_LABEL_LEN {
        return Err("invalid label: too long".to_string());
    }
    if !(0.0..=1.0).contains(&item.score) {
        return Err(format!("invalid score: {}", item.score));
    }
    Ok(())
}

impl TextClassifier for RemoteTextClassifier {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn classify(&self, text: &str) -> Result<Classification, String> {
        let span = tracing::info_span!(
            "infra.classifier.remote",
            url = %self.url,
            timeout_ms = self.timeout_ms
        );
        let _enter = span.enter();

        let start = Instant::now();
        let result = self.send(text);
        record_classifier_metrics(BACKEND, start, &result);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "remote classifier request failed");
        }
        result
    }
}
