pub mod form;
pub mod latest;
pub mod page;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub use latest::{LatestFeedbackView, RecordView, format_timestamp};

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(page::index))
        .route("/feedback", post(page::submit))
        // HTMX partials
        .route("/partials/latest", get(latest::partial))
}
