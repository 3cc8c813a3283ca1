use std::sync::Arc;

use crate::config::Config;
use crate::rate_limit::SubmissionRateLimiter;
use crate::store::FeedbackStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn FeedbackStore>,
    pub config: Config,
    pub submission_limiter: SubmissionRateLimiter,
}
