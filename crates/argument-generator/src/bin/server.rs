//! Argument generator server binary
//!
//! Run with: cargo run -p argument-generator --bin argument-generator-server

use std::path::PathBuf;

use argument_generator::{config::AppConfig, server::ArgumentServer, BackendProvider};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "argument-generator-server", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generation backend (gemini or local)
    #[arg(short, long)]
    backend: Option<BackendProvider>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for uploaded files
    #[arg(long)]
    upload_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // API key and overrides may live in a local .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "argument_generator=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.upload_dir {
        config.storage.upload_dir = dir;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Backend: {} ({})", config.backend, config.active_model());
    tracing::info!("  - Upload directory: {}", config.storage.upload_dir.display());
    tracing::info!("  - CORS: {}", config.server.enable_cors);

    let server = ArgumentServer::new(config)?;

    // Probe the backend once; failures only warn, generation reports errors per request
    let backend = server.state().backend().clone();
    match backend.health_check().await {
        Ok(true) => tracing::info!("Backend {} is reachable", backend.name()),
        _ => match server.state().config().backend {
            BackendProvider::Gemini => {
                tracing::warn!("Gemini not reachable; check GOOGLE_API_KEY and network access")
            }
            BackendProvider::Local => {
                tracing::warn!(
                    "Local model server not available at {}",
                    server.state().config().local.base_url
                );
                tracing::warn!("  Start it with: ollama serve && ollama pull {}", backend.model());
            }
        },
    }

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("\nEndpoints:");
    println!("  POST /upload            - Upload a PDF");
    println!("  GET  /list-files        - List uploaded files");
    println!("  POST /extract-arguments - First lines of extracted text");
    println!("  POST /generate          - Generate arguments with the model");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
