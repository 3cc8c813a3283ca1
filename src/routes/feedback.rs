use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::feedback::{SubmissionForm, SubmitOutcome, client_ip};
use crate::models::FeedbackRecord;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateFeedbackRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub feedback: String,
}

pub async fn create(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackRecord>), AppError> {
    let ip = client_ip::resolve(&headers, addr.ip(), &state.config.trusted_proxies);
    let mut form = SubmissionForm::new(req.name, req.email, req.feedback);
    state
        .submission_limiter
        .check_submission(ip, &form)
        .map_err(AppError::RateLimited)?;

    match form.submit(state.store.as_ref(), || {}).await {
        SubmitOutcome::Submitted(record) => Ok((StatusCode::CREATED, Json(record))),
        SubmitOutcome::Invalid(err) => Err(AppError::Validation(err)),
        SubmitOutcome::Failed(err) => Err(AppError::Store(err)),
        // A fresh form never has a submission in flight
        SubmitOutcome::Ignored => Err(AppError::Internal(
            "submission already in flight".to_string(),
        )),
    }
}

pub async fn latest(
    State(state): State<SharedState>,
) -> Result<Json<Option<FeedbackRecord>>, AppError> {
    let record = state.store.latest().await?;
    Ok(Json(record))
}
