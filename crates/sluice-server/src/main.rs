mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use routes::{router, AppState};
use sluice_api::AddonClient;
use sluice_core::AppConfig;
use sluice_parse::KeywordExtractor;

#[derive(Parser)]
#[command(name = "sluice")]
#[command(version)]
#[command(about = "Stream-aggregating addon that ranks, deduplicates and filters upstream streams")]
struct Cli {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening IP address (overrides config)
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port (overrides config)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "sluice_server={0},sluice_core={0},sluice_api={0}",
                    cli.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(host) = cli.host {
        config.server.listen = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let http = reqwest::Client::new();
    let providers = config
        .upstreams
        .iter()
        .map(|upstream| AddonClient::new(&upstream.name, &upstream.base_url, http.clone()))
        .collect::<Result<Vec<_>, _>>()
        .context("building upstream clients")?;

    let addr = format!("{}:{}", config.server.listen, config.server.port);
    info!(
        %addr,
        upstreams = providers.len(),
        profiles = config.profiles.len(),
        "starting sluice"
    );

    let state = Arc::new(AppState {
        config,
        providers,
        extractor: KeywordExtractor,
    });
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("binding listen address")?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
