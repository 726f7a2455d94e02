use clap::{Parser, Subcommand};
use sentiment_api::headless::{self, HeadlessRequest};
use sentiment_api::{bootstrap, obs};
use sentiment_application::config;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sentiment-api")]
#[command(about = "Sentiment API: HTTP listener, Lambda handler or one-shot runner.", version)]
#[command(
    after_help = "Examples:\n  sentiment-api serve --config platform/ops/configs/polarity.toml\n  sentiment-api once --text \"I love this product!\"\n  echo '{\"text\":\"This is terrible.\"}' | sentiment-api once\n  sentiment-api doc\n  sentiment-api config --config platform/ops/configs/classification.toml\n"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<CliCommand>,

    /// Config file path (TOML). If omitted, uses env SENTIMENT_CONFIG, then built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when SENTIMENT_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format: text | json
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Prometheus metrics listen addr (e.g. 127.0.0.1:9898). Optional.
    #[arg(long, global = true)]
    metrics_addr: Option<String>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Run the long-lived HTTP listener (default).
    Serve {
        /// Listen address; overrides server.listen.
        #[arg(long)]
        listen: Option<String>,
    },
    /// Serve requests from the AWS Lambda runtime (API Gateway events).
    Lambda,
    /// Analyze a single text and print the JSON response body.
    Once {
        /// Text to analyze. If omitted, a JSON request body is read from stdin.
        #[arg(long)]
        text: Option<String>,
    },
    /// Print the OpenAPI document.
    Doc,
    /// Validate the config and print the effective settings as TOML.
    Config,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = obs::init_tracing(&cli.log_level, &cli.log_format) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let command = cli.command.unwrap_or(CliCommand::Serve { listen: None });
    let config_path = bootstrap::resolve_config_path(cli.config);
    let mut config = match bootstrap::load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    if let CliCommand::Serve {
        listen: Some(listen),
    } = &command
    {
        config.server.listen = listen.clone();
    }

    if let CliCommand::Config = command {
        match config::to_toml_pretty(&config) {
            Ok(rendered) => {
                print!("{rendered}");
                return;
            }
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }

    let metrics_addr = obs::resolve_metrics_addr(cli.metrics_addr);
    if let Err(err) = obs::init_metrics(metrics_addr.as_deref()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let contract = config.classifier.contract;
    let app = match bootstrap::build_router(&config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to init tokio runtime: {err}");
            std::process::exit(1);
        }
    };

    let result = match command {
        CliCommand::Serve { .. } => match config.listen_addr() {
            Ok(addr) => runtime.block_on(serve(app, addr)),
            Err(err) => Err(err),
        },
        CliCommand::Lambda => runtime.block_on(run_lambda(app)),
        CliCommand::Once { text } => match read_once_body(text) {
            Ok(body) => runtime.block_on(print_once(
                app,
                contract,
                HeadlessRequest::Analyze { body },
            )),
            Err(err) => Err(err),
        },
        CliCommand::Doc => {
            runtime.block_on(print_once(app, contract, HeadlessRequest::Documentation))
        }
        CliCommand::Config => Ok(()),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn serve(app: axum::Router, addr: std::net::SocketAddr) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind {addr}: {err}"))?;
    tracing::info!(listen = %addr, "sentiment api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("http server failed: {err}"))?;

    tracing::info!("sentiment api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(feature = "lambda")]
async fn run_lambda(app: axum::Router) -> Result<(), String> {
    tracing::info!("starting lambda handler");
    lambda_http::run(app)
        .await
        .map_err(|err| format!("lambda runtime failed: {err}"))
}

#[cfg(not(feature = "lambda"))]
async fn run_lambda(_app: axum::Router) -> Result<(), String> {
    Err("lambda mode requires sentiment-api feature `lambda`".to_string())
}

fn read_once_body(text: Option<String>) -> Result<String, String> {
    if let Some(text) = text {
        return Ok(headless::analyze_body_for_text(&text));
    }
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .map_err(|err| format!("failed to read request body from stdin: {err}"))?;
    Ok(body)
}

async fn print_once(
    app: axum::Router,
    contract: sentiment_domain::value_objects::contract::Contract,
    request: HeadlessRequest,
) -> Result<(), String> {
    let response = headless::run_once(app, contract, request).await?;
    println!(
        "{}",
        serde_json::to_string(&response.body)
            .unwrap_or_else(|_| "{\"detail\":\"json\"}".to_string())
    );
    if response.is_success() {
        Ok(())
    } else {
        Err(format!("request failed with status {}", response.status))
    }
}
