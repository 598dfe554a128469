use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use lethe_core::command::ForgottenEngine;
use lethe_core::config::ForgottenConfig;
use lethe_core::signing::Sha256UrlSigner;
use lethe_core::storage::disk::DiskObjectStore;

#[derive(Parser)]
#[command(name = "lethe", about = "Forgotten-files command service")]
struct Cli {
    /// Address to bind the HTTP command endpoint to
    #[arg(long, default_value = "0.0.0.0:8000", env = "LETHE_BIND")]
    bind: String,

    /// Root directory of the forgotten-files namespace
    #[arg(long, default_value = "forgotten", env = "LETHE_STORAGE_ROOT")]
    storage_root: PathBuf,

    /// Scheme and host used in issued download URLs
    #[arg(long, default_value = "http://localhost:8000", env = "LETHE_BASE_URL")]
    base_url: String,

    /// Secret for signed-URL tokens
    #[arg(long, env = "LETHE_SIGNING_SECRET")]
    signing_secret: String,

    /// Signed-URL validity window in seconds
    #[arg(long, default_value = "600", env = "LETHE_TOKEN_TTL")]
    token_ttl_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lethe=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let storage = Arc::new(DiskObjectStore::open(&cli.storage_root).await?);
    tracing::info!("Forgotten-files namespace at {:?}", cli.storage_root);

    let signer = Arc::new(Sha256UrlSigner::new(cli.signing_secret));
    let config = ForgottenConfig {
        base_url: cli.base_url,
        token_ttl_seconds: cli.token_ttl_seconds,
    };

    let engine = Arc::new(ForgottenEngine::new(storage, signer, config));
    let app = lethe_rest::router(engine);

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    tracing::info!("Command endpoint listening on {}", cli.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {e}");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    Ok(())
}
