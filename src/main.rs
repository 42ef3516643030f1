use anyhow::{Context, Result};
use clap::Parser;
use short_video::{create_router, AppState, Config, SimulatedPlatform, Studio};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "short-video", version, about = "Record short audio/video clips")]
struct Args {
    /// Configuration file (extension optional)
    #[arg(short, long, default_value = "config/short-video")]
    config: String,

    /// Override the HTTP bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    let bind = args.bind.unwrap_or(cfg.service.http.bind);
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let platform = Arc::new(SimulatedPlatform::new(cfg.platform.simulated()));
    let mut studio = Studio::new(platform, &cfg.capture);

    // Failures leave the studio without a preview; the user can still re-select
    match studio.hydrate().await {
        Ok(Some(stream)) => info!("Preview live on stream {}", stream.id),
        Ok(None) => info!("No stream requested"),
        Err(e) => warn!("Initial capture setup failed: {}", e),
    }

    let state = AppState::new(studio);
    let app = create_router(state.clone());

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await
        .context("HTTP server error")?;

    state.studio.lock().await.terminate().await;
    info!("Shut down");

    Ok(())
}
