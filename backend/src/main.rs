use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use speech_copilot::config::{Config, LoggingConfig};
use speech_copilot::services::llm::AnthropicClient;
use speech_copilot::{AppState, build_router};

#[derive(Debug, Parser)]
#[command(name = "speech-copilot", version, about = "AI-powered speech generation API")]
struct Args {
    /// Path to config.toml (default: conf/config.toml or ./config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let mut config = load_config(args.config.as_deref(), std::io::stderr)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _guard = init_logging(&config.logging)?;

    if !config.llm.has_api_key() {
        tracing::warn!("⚠️  WARNING: No model API key configured!");
        tracing::warn!("⚠️  Set ANTHROPIC_API_KEY or llm.api_key; generation requests will fail");
    }

    let llm_client = AnthropicClient::from_config(&config.llm)?;
    tracing::info!(
        "Model provider: {} (model={}, configured={})",
        config.llm.api_base,
        config.llm.model,
        config.llm.has_api_key()
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, Arc::new(llm_client)));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Speech Copilot API listening on http://{}", addr);
    tracing::info!("API docs available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Load the configuration under a temporary console subscriber.
///
/// The real subscriber depends on `logging.*`, so it can only be installed
/// afterwards; without this the loader's warnings and override lines are lost.
fn load_config<W>(path: Option<&str>, writer: W) -> anyhow::Result<Config>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = fmt().with_env_filter(EnvFilter::new("info")).with_writer(writer).finish();
    tracing::subscriber::with_default(bootstrap, || Config::load(path))
}

/// Console logging always; file logging when `logging.file` is set.
/// The returned guard must live until shutdown so buffered lines are flushed.
fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|e| {
        eprintln!("Invalid log level '{}': {}, falling back to 'info'", config.level, e);
        EnvFilter::new("info")
    });
    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match &config.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| "speech-copilot.log".to_string());
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry.with(fmt::layer().with_ansi(false).with_writer(writer)).init();
            Ok(Some(guard))
        },
        None => {
            registry.init();
            Ok(None)
        },
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
