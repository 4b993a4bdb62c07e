use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{assign_handler, health_handler, sweep_handler, unassign_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/relay", post(assign_handler).delete(unassign_handler))
            .route("/relay/expired", delete(sweep_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
