//! Signed request server and client tool.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                  SIGNING LAYER                        │
//!   Client Request    │  ┌──────────┐   ┌──────────┐   ┌──────────┐          │
//!   ──────────────────┼─▶│  router  │──▶│  policy  │──▶│ verifier │──┐       │
//!   X-SignedRequest   │  │ (axum)   │   │ resolver │   │ 404/pass │  │       │
//!                     │  └──────────┘   └──────────┘   └──────────┘  ▼       │
//!                     │                                       ┌────────────┐ │
//!                     │                                       │application │ │
//!                     │                                       │  handler   │ │
//!   Client Response   │  ┌──────────┐                         └─────┬──────┘ │
//!   ◀─────────────────┼──│  signer  │◀──────────────────────────────┘        │
//!   X-SignedRequest   │  └──────────┘                                        │
//!                     └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use axum::{routing::get, Router};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use signed_request::client::SignedClient;
use signed_request::config::{self, SignedRequestConfig};
use signed_request::observability::{logging, metrics};
use signed_request::{HttpServer, RouteOverride, Secret, SignatureAlgorithm, SignedRequestState, Signer, Shutdown};

#[derive(Parser)]
#[command(name = "signed-request")]
#[command(about = "Serve or call applications protected by X-SignedRequest", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo application behind the signing layer (default)
    Serve,
    /// Print the signature of a path or response body
    Sign {
        content: String,
        #[arg(short, long, env = "SIGNED_REQUEST_SECRET")]
        secret: String,
        #[arg(short, long, default_value = "hmac-sha256")]
        algorithm: SignatureAlgorithm,
    },
    /// Send a signed GET request and check the response signature
    Get {
        path: String,
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
        #[arg(short, long, env = "SIGNED_REQUEST_SECRET")]
        secret: String,
        #[arg(short, long, default_value = "hmac-sha256")]
        algorithm: SignatureAlgorithm,
    },
}

fn signer(secret: String, algorithm: SignatureAlgorithm) -> Result<Signer, Box<dyn std::error::Error>> {
    Ok(Signer::new(Secret::new(secret)?, algorithm))
}

/// Demo application: both routes answer `TestResponse`.
fn demo_app() -> Router {
    Router::new()
        .route("/test", get(|| async { "TestResponse" }))
        .route("/annotation", get(|| async { "TestResponse" }))
}

async fn serve(config: SignedRequestConfig) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging(&config.observability);
    tracing::info!("signed-request v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // `/annotation` always requires a signature, whatever the global switch.
    let state = SignedRequestState::from_config(&config)?
        .with_route("/annotation", RouteOverride::verify(true));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::with_state(config, state, demo_app());
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = match &cli.config {
                Some(path) => config::load_config(path)?,
                None => config::load_from_env()?,
            };
            serve(config).await?;
        }
        Commands::Sign {
            content,
            secret,
            algorithm,
        } => {
            println!("{}", signer(secret, algorithm)?.sign(content.as_bytes()));
        }
        Commands::Get {
            path,
            url,
            secret,
            algorithm,
        } => {
            let client = SignedClient::new(url, signer(secret, algorithm)?);
            let response = client.get(&path).await?;
            println!("Status: {}", response.status);
            println!("Signature: {}", response.signature.as_str());
            if let Some(debug) = response.debug {
                println!("Debug: {}", debug);
            }
            println!("{}", response.text());
        }
    }

    Ok(())
}
