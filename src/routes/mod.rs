//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/process` - Document + prompt processing
//! - `/api/health` - Health checks

pub mod health;
pub mod process;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let router = Router::new()
        .merge(process::router(state))
        .merge(health::router())
        .layer(TraceLayer::new_for_http());

    apply_cors(router)
}
