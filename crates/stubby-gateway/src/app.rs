use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, redirect_handler, shorten_handler, stats_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/r/{id}", get(redirect_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/shorten", post(shorten_handler))
                    .route("/stats/{id}", get(stats_handler)),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
