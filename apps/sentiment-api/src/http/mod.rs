mod error;

pub use error::ApiError;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use sentiment_application::analysis::SentimentService;
use sentiment_application::config::CorsConfig;
use sentiment_application::documentation::ApiDocumentation;
use sentiment_application::routes::{self, DOC_PATH};
use sentiment_domain::errors::ServiceError;
use sentiment_domain::value_objects::text_input::TextInput;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    service: Arc<SentimentService>,
    docs: Arc<ApiDocumentation>,
    expose_error_details: bool,
}

impl AppState {
    pub fn new(
        service: SentimentService,
        docs: ApiDocumentation,
        expose_error_details: bool,
    ) -> Self {
        Self {
            service: Arc::new(service),
            docs: Arc::new(docs),
            expose_error_details,
        }
    }
}

/// Routes for the configured contract plus the documentation route.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let analysis_path = routes::analysis_path(state.service.contract());
    Router::new()
        .route(analysis_path, post(analyze).fallback(method_not_allowed))
        .route(DOC_PATH, get(documentation).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allowed origins come from configuration; methods and request headers are
/// mirrored so credentials stay permitted.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, String> {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials);

    if config.allowed_origins.iter().any(|o| o.trim() == "*") {
        if config.allow_credentials {
            return Err("cors: wildcard origin cannot be combined with credentials".to_string());
        }
        return Ok(layer.allow_origin(AllowOrigin::any()));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim().trim_end_matches('/'))
                .map_err(|_| format!("cors: invalid origin '{origin}'"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Response {
    let contract = state.service.contract();
    let route = routes::analysis_path(contract);
    let span = tracing::info_span!("app.http.analyze", contract = contract.as_str());

    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let status = rejection.status();
            record_request(route, status);
            return ApiError::new(status, rejection.body_text()).into_response();
        }
    };

    let service = state.service.clone();
    let result =
        tokio::task::spawn_blocking(move || span.in_scope(|| service.analyze(&input.text)))
            .await
            .unwrap_or_else(|err| {
                Err(ServiceError::Internal(format!(
                    "analysis task failed: {err}"
                )))
            });

    let response = match result {
        Ok(output) => (StatusCode::OK, Json(output)).into_response(),
        Err(err) => {
            ApiError::from_analysis(err, contract, state.expose_error_details).into_response()
        }
    };
    record_request(route, response.status());
    response
}

async fn documentation(State(state): State<AppState>) -> Response {
    let response = match state.docs.get_documentation() {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(err) => {
            if !err.is_client_error() {
                tracing::warn!(error = %err, "failed to assemble documentation");
            }
            ApiError::from_documentation(err, state.expose_error_details).into_response()
        }
    };
    record_request(DOC_PATH, response.status());
    response
}

async fn not_found() -> ApiError {
    record_request("fallback", StatusCode::NOT_FOUND);
    ApiError::new(StatusCode::NOT_FOUND, "Not Found")
}

async fn method_not_allowed() -> ApiError {
    record_request("method_not_allowed", StatusCode::METHOD_NOT_ALLOWED);
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

fn record_request(route: &'static str, status: StatusCode) {
    metrics::counter!(
        "sentiment.api.requests_total",
        "route" => route,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}
