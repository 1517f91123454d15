//! HTTP gateway (Axum): `/rerank`, `/health` and `/`.
//!
//! This module is primarily used by the `rerank-server` binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{health_handler, rerank_handler, root_handler};
pub use payload::{ErrorResponse, HealthResponse, RerankRequest, RerankResponse, RootResponse};
pub use state::{AlreadyInstalled, AppState};

use crate::engine::TextGenerator;

pub fn create_router_with_state<G>(state: AppState<G>) -> Router
where
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler::<G>))
        .route("/rerank", post(rerank_handler::<G>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
