use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use axum::Router;
use sentiment_application::routes::{self, DOC_PATH};
use sentiment_domain::value_objects::contract::Contract;
use tower::ServiceExt;

const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessRequest {
    /// Raw JSON request body for the analysis route.
    Analyze { body: String },
    Documentation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl HeadlessResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn analyze_body_for_text(text: &str) -> String {
    serde_json::json!({ "text": text }).to_string()
}

/// Drives one request through the same router the listener and the Lambda
/// handler use, without opening a socket.
pub async fn run_once(
    app: Router,
    contract: Contract,
    request: HeadlessRequest,
) -> Result<HeadlessResponse, String> {
    let request = match request {
        HeadlessRequest::Analyze { body } => Request::builder()
            .method(Method::POST)
            .uri(routes::analysis_path(contract))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body)),
        HeadlessRequest::Documentation => Request::builder()
            .method(Method::GET)
            .uri(DOC_PATH)
            .body(Body::empty()),
    }
    .map_err(|err| format!("failed to build request: {err}"))?;

    let response = app
        .oneshot(request)
        .await
        .map_err(|err| format!("request failed: {err}"))?;
    let status = response.status().as_u16();
    let bytes = to_bytes(response.into_body(), MAX_RESPONSE_BYTES)
        .await
        .map_err(|err| format!("failed to read response body: {err}"))?;
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
    };

    Ok(HeadlessResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::{analyze_body_for_text, HeadlessResponse};

    #[test]
    fn analyze_body_escapes_text() {
        let body = analyze_body_for_text("say \"hi\"\n");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(parsed["text"], "say \"hi\"\n");
    }

    #[test]
    fn success_is_2xx_only() {
        let ok = HeadlessResponse {
            status: 200,
            body: serde_json::Value::Null,
        };
        let bad = HeadlessResponse {
            status: 400,
            body: serde_json::Value::Null,
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }
}
