//! Axum router wiring.
//!
//! The metrics route path comes from config; health endpoints are fixed.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.cfg().gateway.metrics_path.clone();
    Router::new()
        .route(&metrics_path, get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .with_state(state)
}
