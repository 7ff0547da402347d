use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use scp294::connector::adapter::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_MODERATION_MODEL};
use scp294::connector::{build_router, Container, ContainerConfig};

#[derive(Parser)]
#[command(name = "scp294")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    verbose: bool,

    /// Listening port. Falls back to the PORT environment variable, then 3000.
    #[arg(short, long)]
    port: Option<u16>,

    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Requests per source per minute before the failsafe kicks in.
    #[arg(long, default_value = "10")]
    rate_limit: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Configuration is read once here and validated before anything binds.
    // A missing credential refuses to start rather than failing per-request.
    let api_key = std::env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY must be set; refusing to start without a provider credential")?;
    let base_url =
        std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let moderation_model = std::env::var("OPENAI_MODERATION_MODEL")
        .unwrap_or_else(|_| DEFAULT_MODERATION_MODEL.to_string());

    let port = cli
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(3000);

    let container = Arc::new(Container::new(ContainerConfig {
        api_key,
        base_url,
        model,
        moderation_model,
        rate_limit_per_minute: cli.rate_limit,
    }));

    let app = build_router(container);

    let addr = format!("{}:{}", cli.bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("scp294 dispenser listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
