use http::HeaderValue;
use sentiment_domain::value_objects::contract::Contract;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    Vader,
    Remote,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub classifier: ClassifierConfig,
    pub cors: CorsConfig,
    pub docs: DocsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub listen: String,
    /// Embed raw classifier/internal error messages in response bodies.
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            expose_error_details: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub contract: Contract,
    pub backend: ClassifierBackend,
    pub remote: Option<RemoteClassifierConfig>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            contract: Contract::Polarity,
            backend: ClassifierBackend::Vader,
            remote: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RemoteClassifierConfig {
    pub url: String,
    pub timeout_ms: Option<u64>,
    /// Name of the env var holding a bearer token, if the endpoint needs one.
    pub api_token_env: Option<String>,
}

impl RemoteClassifierConfig {
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_REMOTE_TIMEOUT_MS)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            allow_credentials: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    pub enabled: bool,
    pub title: String,
    pub description: String,
    pub version: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Sentiment API".to_string(),
            description:
                "Analyze the sentiment of a given text as positive, negative, or neutral."
                    .to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

impl Config {
    pub fn listen_addr(&self) -> Result<SocketAddr, String> {
        self.server.listen.trim().parse().map_err(|err| {
            format!(
                "invalid server.listen '{}' (expected host:port): {err}",
                self.server.listen
            )
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        self.listen_addr()?;

        match (self.classifier.contract, self.classifier.backend) {
            (Contract::Polarity, ClassifierBackend::Vader) => {}
            (Contract::Classification, ClassifierBackend::Remote) => {
                let remote = self.classifier.remote.as_ref().ok_or_else(|| {
                    "classifier.backend='remote' requires a [classifier.remote] section".to_string()
                })?;
                validate_remote(remote)?;
            }
            (contract, backend) => {
                return Err(format!(
                    "classifier.contract='{contract}' cannot be served by classifier.backend='{}'",
                    backend_name(backend)
                ));
            }
        }

        for origin in &self.cors.allowed_origins {
            let trimmed = origin.trim();
            if trimmed.is_empty() {
                return Err("cors.allowed_origins contains an empty origin".to_string());
            }
            if trimmed == "*" && self.cors.allow_credentials {
                return Err(
                    "cors.allowed_origins='*' cannot be combined with cors.allow_credentials=true"
                        .to_string(),
                );
            }
            if trimmed != "*" && HeaderValue::from_str(trimmed.trim_end_matches('/')).is_err() {
                return Err(format!("cors.allowed_origins contains an invalid origin '{origin}'"));
            }
        }

        Ok(())
    }
}

fn validate_remote(remote: &RemoteClassifierConfig) -> Result<(), String> {
    let url = remote.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(format!(
            "classifier.remote.url must be an http(s) URL, got '{}'",
            remote.url
        ));
    }
    if remote.timeout_ms() == 0 {
        return Err("classifier.remote.timeout_ms must be > 0".to_string());
    }
    if let Some(name) = remote.api_token_env.as_deref() {
        if name.trim().is_empty() {
            return Err("classifier.remote.api_token_env is empty".to_string());
        }
    }
    Ok(())
}

pub fn backend_name(backend: ClassifierBackend) -> &'static str {
    match backend {
        ClassifierBackend::Vader => "vader",
        ClassifierBackend::Remote => "remote",
    }
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))?;
    config
        .validate()
        .map_err(|err| format!("invalid config {}: {err}", path.display()))?;
    Ok(config)
}

pub fn to_toml_pretty(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}
