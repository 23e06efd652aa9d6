//! promwell Gateway
//!
//! A scrape target in a box:
//! - Metrics endpoint: /metrics (path configurable)
//! - Process default collectors refreshed per scrape
//! - Graceful shutdown: readiness flips to draining, then a grace period

use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use promwell_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "promwell.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("state build failed");
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "promwell-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown(state))
        .await
        .expect("server failed");
}

/// Wait for ctrl-c, flip readiness to draining, then let in-flight scrapes
/// finish for the configured grace period.
async fn shutdown(state: app_state::AppState) {
    let _ = tokio::signal::ctrl_c().await;
    state.set_draining();
    let grace = state.cfg().gateway.shutdown_grace_ms;
    tracing::info!(grace_ms = grace, "shutdown signal received, draining");
    tokio::time::sleep(Duration::from_millis(grace)).await;
}
