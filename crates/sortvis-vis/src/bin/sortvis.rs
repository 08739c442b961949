//! Sortvis Visualization Server
//!
//! Generate the sorting traces and serve the playback frontend.

use std::env;

use sortvis_vis::{VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sortvis=info,sortvis_vis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = VisConfig::from_env()?;

    // Optional positional port overrides SORTVIS_ADDR's port
    if let Some(port) = env::args().nth(1).and_then(|s| s.parse().ok()) {
        config = config.with_port(port);
    }

    tracing::info!(
        algorithm = %config.algorithm,
        speed_ms = config.speed_ms,
        "Starting sorting visualizer"
    );
    println!("Open http://localhost:{} in a browser to step through the sorts.", config.addr.port());

    VisServer::new(config).serve().await?;

    Ok(())
}
