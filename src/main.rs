//! Update Feed - classified multi-repository activity feed
//!
//! # Usage
//! ```bash
//! update-feed acme/platform acme/platform-api     # Serve the merged feed
//! update-feed acme/platform --recent 50 --port 4000
//! ```
//!
//! A bearer token for the upstream API is read from `UPDATE_FEED_TOKEN`;
//! without it requests run unauthenticated at a lower rate limit.

mod config;
mod error;
mod feed;
mod models;
mod routes;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{FeedConfig, SourceSpec};
use feed::FeedPipeline;

/// Update Feed - serve a classified activity feed over upstream repositories
#[derive(Parser)]
#[command(name = "update-feed")]
#[command(about = "A classified multi-repository activity feed", long_about = None)]
struct Cli {
    /// Upstream repositories as owner/repo or owner/repo=tag
    #[arg(value_name = "SOURCE", required = true)]
    sources: Vec<String>,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Recent-window size (commits per source)
    #[arg(short, long, default_value = "30")]
    recent: usize,

    /// Cache time-to-live in seconds
    #[arg(long, default_value = "300")]
    ttl: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let sources = cli
        .sources
        .iter()
        .map(|raw| SourceSpec::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut feed_config = FeedConfig::new(sources);
    feed_config.recent_window = cli.recent;
    feed_config.cache_ttl = Duration::from_secs(cli.ttl);

    let pipeline = FeedPipeline::new(&feed_config)?;
    let shared_feed = Arc::new(pipeline);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_router(shared_feed)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Update Feed");
    println!("  Sources: {}", cli.sources.join(", "));
    println!("  Server:  http://{}", addr);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
