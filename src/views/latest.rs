use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use chrono::{DateTime, Local, Utc};

use crate::config::DisplayZone;
use crate::error::AppError;
use crate::feedback::Notice;
use crate::models::FeedbackRecord;
use crate::state::SharedState;

/// `MMM d, yyyy 'at' h:mm a`, e.g. "Jan 5, 2024 at 3:45 PM".
const TIMESTAMP_FORMAT: &str = "%b %-d, %Y at %-I:%M %p";

pub fn format_timestamp(ts: &DateTime<Utc>, zone: DisplayZone) -> String {
    match zone {
        DisplayZone::Local => ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
        DisplayZone::Fixed(offset) => ts.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordView {
    pub name: String,
    pub email: String,
    pub feedback: String,
    pub submitted_at: String,
}

/// What the latest-feedback panel shows. A pure function of its inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum LatestFeedbackView {
    Loading,
    Empty,
    Record(RecordView),
}

impl LatestFeedbackView {
    pub fn new(feedback: Option<&FeedbackRecord>, is_loading: bool, zone: DisplayZone) -> Self {
        if is_loading {
            return LatestFeedbackView::Loading;
        }

        match feedback {
            None => LatestFeedbackView::Empty,
            Some(record) => LatestFeedbackView::Record(RecordView {
                name: record.name.clone(),
                email: record.email.clone(),
                feedback: record.feedback.clone(),
                submitted_at: format_timestamp(&record.created_at, zone),
            }),
        }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        self.template(None).render()
    }

    fn template(&self, notice: Option<Notice>) -> LatestFeedbackTemplate<'_> {
        LatestFeedbackTemplate {
            loading: matches!(self, LatestFeedbackView::Loading),
            record: match self {
                LatestFeedbackView::Record(record) => Some(record),
                _ => None,
            },
            notice,
        }
    }
}

#[derive(Template)]
#[template(path = "partials/latest_feedback.html")]
struct LatestFeedbackTemplate<'a> {
    loading: bool,
    record: Option<&'a RecordView>,
    notice: Option<Notice>,
}

/// Fetch the latest record and render the panel body for HTMX.
pub async fn partial(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let html = render_latest(&state).await?;
    Ok(Html(html))
}

/// Read failures are logged and shown as the empty panel with a notice.
pub async fn render_latest(state: &SharedState) -> Result<String, AppError> {
    let zone = state.config.display_zone;
    let html = match state.store.latest().await {
        Ok(latest) => LatestFeedbackView::new(latest.as_ref(), false, zone).render()?,
        Err(err) => {
            tracing::error!("Failed to load latest feedback: {err}");
            LatestFeedbackView::Empty
                .template(Some(Notice::load_failed()))
                .render()?
        }
    };
    Ok(html)
}
