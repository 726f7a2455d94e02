use crate::http::{self, AppState};
use axum::Router;
use sentiment_application::analysis::SentimentService;
use sentiment_application::config::{
    self, backend_name, ClassifierBackend, Config, RemoteClassifierConfig,
};
use sentiment_application::documentation::ApiDocumentation;
use sentiment_infrastructure::classifiers::remote::RemoteTextClassifier;
use sentiment_infrastructure::classifiers::vader::VaderPolarityScorer;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SENTIMENT_CONFIG";

pub fn resolve_config_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    cli_path.or_else(|| {
        env::var(CONFIG_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    })
}

/// Loads the TOML config when a path is given, otherwise the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => {
            if !path.is_file() {
                return Err(format!(
                    "config file not found: {} (set --config or {CONFIG_ENV})",
                    path.display()
                ));
            }
            config::load_config(path)
        }
        None => {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Loads the classifier once. Any failure here aborts startup.
pub fn build_service(config: &Config) -> Result<SentimentService, String> {
    let classifier = &config.classifier;
    let span = tracing::info_span!(
        "bootstrap.classifier",
        contract = classifier.contract.as_str(),
        backend = backend_name(classifier.backend)
    );
    let _enter = span.enter();

    let service = match classifier.backend {
        ClassifierBackend::Vader => {
            SentimentService::polarity(Box::new(VaderPolarityScorer::new()))
        }
        ClassifierBackend::Remote => {
            let remote = classifier.remote.as_ref().ok_or_else(|| {
                "classifier.backend='remote' requires a [classifier.remote] section".to_string()
            })?;
            SentimentService::classification(Box::new(build_remote_classifier(remote)?))
        }
    };

    if service.contract() != classifier.contract {
        return Err(format!(
            "classifier.contract='{}' cannot be served by classifier.backend='{}'",
            classifier.contract,
            backend_name(classifier.backend)
        ));
    }

    tracing::info!("classifier ready");
    Ok(service)
}

fn build_remote_classifier(
    remote: &RemoteClassifierConfig,
) -> Result<RemoteTextClassifier, String> {
    let token = resolve_api_token(remote)?;
    RemoteTextClassifier::new_with_token(remote.url.clone(), remote.timeout_ms(), token).map_err(
        |err| {
            format!(
                "failed to init remote classifier client (url={}): {err}",
                remote.url
            )
        },
    )
}

fn resolve_api_token(remote: &RemoteClassifierConfig) -> Result<Option<String>, String> {
    let Some(name) = remote.api_token_env.as_deref() else {
        return Ok(None);
    };
    match env::var(name) {
        Ok(token) if !token.trim().is_empty() => Ok(Some(token)),
        _ => Err(format!(
            "classifier.remote.api_token_env={name} but env {name} is not set"
        )),
    }
}

pub fn build_state(config: &Config) -> Result<AppState, String> {
    let service = build_service(config)?;
    let docs = ApiDocumentation::new(config.docs.clone(), service.contract());
    Ok(AppState::new(
        service,
        docs,
        config.server.expose_error_details,
    ))
}

pub fn build_router(config: &Config) -> Result<Router, String> {
    let state = build_state(config)?;
    let cors = http::cors_layer(&config.cors)?;
    Ok(http::router(state, cors))
}
