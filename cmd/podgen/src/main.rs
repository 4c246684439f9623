//! podgen - Japanese two-host podcast generation API.

mod config;
mod error;
mod handlers;
mod routes;
mod state;


use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{parse_addr, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let state = args.build_state()?;
    let app = routes::router(state);

    let addr = parse_addr(&args.addr)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "podgen listening");
    println!("Server started at http://{}", addr);
    println!("  - POST /scrape                     Scrape a URL");
    println!("  - POST /generate                   Single-host script and audio");
    println!("  - POST /generate-podcast-from-url  Two-host podcast from a URL");
    println!("  - POST /check-audio-status         Long-text audio task status");
    println!("  - GET  /voices                     Available voices");
    println!("  - GET  /test-voice-id              Voice mapping diagnostic");
    println!("  - GET  /test-minimax               Speech smoke test");
    println!();

    axum::serve(listener, app).await?;
    Ok(())
}
