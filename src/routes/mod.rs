pub mod feedback;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/feedback", post(feedback::create))
        .route("/api/v1/feedback/latest", get(feedback::latest))
}
