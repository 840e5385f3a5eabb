//! Hook Mentor entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Load configuration** — read `.env` if present, then resolve every
//!    secret (environment first, SSM Parameter Store fallback). A missing
//!    secret stops the process before it binds a port.
//! 2. **Wire observability** — configure `tracing-subscriber` with a JSON or
//!    pretty layer and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an
//!    OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure** — `GeminiProvider`, `SmtpNotifier`, and the
//!    completion strategy for the detected execution mode, injected into
//!    `EventDispatcher`.
//! 4. **Serve** — run the webhook listener until Ctrl-C / SIGTERM.

mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use listener::AppState;
use llm::GeminiProvider;
use mailer::SmtpNotifier;
use nodes::{strategy_for, EventDispatcher, TaskGenerator};
use secrets::{load_config, LocalSource, SecretResolver, SsmParameterStore};
use tracing::info;

use crate::telemetry::LogFormat;

/// Turns source-control webhooks into short DevOps learning tasks delivered by email.
#[derive(Debug, Parser)]
#[command(name = "hook-mentor", version, about)]
struct Args {
    /// Address the webhook listener binds to.
    #[arg(long, env = "MENTOR_BIND", default_value = "0.0.0.0:5000")]
    bind: SocketAddr,

    /// Log output format.
    #[arg(long, env = "MENTOR_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap so its values can feed `env = ...` arguments.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let _telemetry = telemetry::init(args.log_format)?;

    let region = std::env::var(SsmParameterStore::REGION_VAR)
        .unwrap_or_else(|_| SsmParameterStore::DEFAULT_REGION.to_string());
    let resolver = SecretResolver::new(
        LocalSource::Environment,
        Arc::new(SsmParameterStore::new(region)),
    );
    let config = load_config(&resolver)
        .await
        .context("failed to load configuration")?;

    let provider = GeminiProvider::new(&config.llm).context("failed to build LLM client")?;
    let notifier = SmtpNotifier::new(config.mail.clone()).context("invalid mail account")?;

    let dispatcher = EventDispatcher::new(
        TaskGenerator::new(Arc::new(provider), config.retry),
        Arc::new(notifier),
        strategy_for(config.execution_mode),
    );
    let app = listener::router(AppState::new(config.webhook_secret.clone(), dispatcher));

    info!(
        bind = %args.bind,
        execution_mode = ?config.execution_mode,
        "Starting webhook listener"
    );
    listener::serve(args.bind, app, shutdown_signal())
        .await
        .context("webhook listener failed")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
