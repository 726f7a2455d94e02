use std::net::SocketAddr;

pub const LOG_ENV: &str = "SENTIMENT_LOG";
pub const METRICS_ADDR_ENV: &str = "SENTIMENT_METRICS_ADDR";

/// Installs the global subscriber. Logs go to stderr so the one-shot mode can
/// keep stdout for the response body.
pub fn init_tracing(log_level: &str, log_format: &str) -> Result<(), String> {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| log_level.to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|err| format!("invalid log filter: {err}"))?;

    let format = log_format.trim().to_lowercase();
    match format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        "text" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
        other => return Err(format!("invalid log format '{other}' (expected text|json)")),
    }
    Ok(())
}

/// `--metrics-addr` wins over `SENTIMENT_METRICS_ADDR`; neither set means no exporter.
pub fn resolve_metrics_addr(cli_value: Option<String>) -> Option<String> {
    cli_value.filter(|v| !v.trim().is_empty()).or_else(|| {
        std::env::var(METRICS_ADDR_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
    })
}

#[cfg(feature = "prometheus")]
pub fn init_metrics(metrics_addr: Option<&str>) -> Result<Option<SocketAddr>, String> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let Some(raw) = metrics_addr else {
        return Ok(None);
    };
    let addr: SocketAddr = raw
        .trim()
        .parse()
        .map_err(|err| format!("invalid --metrics-addr (expected host:port): {err}"))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|err| format!("failed to install prometheus exporter: {err}"))?;

    tracing::info!(metrics_addr = %addr, "prometheus metrics exporter enabled");
    Ok(Some(addr))
}

#[cfg(not(feature = "prometheus"))]
pub fn init_metrics(metrics_addr: Option<&str>) -> Result<Option<SocketAddr>, String> {
    if metrics_addr.is_some() {
        return Err("metrics exporter requires sentiment-api feature `prometheus`".to_string());
    }
    Ok(None)
}
