use std::net::SocketAddr;

use askama::Template;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::error::AppError;
use crate::feedback::{Notice, SubmissionForm, client_ip, honeypot};
use crate::state::SharedState;

use super::form::render_form;
use super::latest::{self, LatestFeedbackView};

/// HTMX event that makes the latest-feedback panel re-fetch itself.
pub const FEEDBACK_SUBMITTED: &str = "feedback-submitted";

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    form_html: String,
    latest_html: String,
    load_on_start: bool,
    refresh_event: &'static str,
}

#[derive(Deserialize)]
pub struct FeedbackFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub website: Option<String>,
}

fn page(form_html: String, latest_html: String, load_on_start: bool) -> Result<Response, AppError> {
    let template = IndexTemplate {
        form_html,
        latest_html,
        load_on_start,
        refresh_event: FEEDBACK_SUBMITTED,
    };
    Ok(Html(template.render()?).into_response())
}

#[derive(Deserialize)]
pub struct IndexQuery {
    pub notice: Option<String>,
}

/// Where a plain form post lands after a successful submit.
pub const SUBMITTED_LOCATION: &str = "/?notice=submitted";

/// The panel starts in its loading state and fetches itself once the page is up.
///
/// After a plain post redirect the latest record is rendered in place, since
/// the submitting browser may not run HTMX.
pub async fn index(
    State(state): State<SharedState>,
    Query(query): Query<IndexQuery>,
) -> Result<Response, AppError> {
    if query.notice.as_deref() == Some("submitted") {
        let form_html = render_form(&SubmissionForm::default(), Some(&Notice::submitted()))?;
        let latest_html = latest::render_latest(&state).await?;
        return page(form_html, latest_html, false);
    }

    let form_html = render_form(&SubmissionForm::default(), None)?;
    let latest_html = LatestFeedbackView::Loading.render()?;
    page(form_html, latest_html, true)
}

pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Form(data): Form<FeedbackFormData>,
) -> Result<Response, AppError> {
    let is_htmx = headers.contains_key("hx-request");
    let ip = client_ip::resolve(&headers, addr.ip(), &state.config.trusted_proxies);
    let mut form = SubmissionForm::new(data.name, data.email, data.feedback);

    let mut submitted = false;
    let mut looks_submitted = false;
    let notice = if honeypot::is_spam(data.website.as_deref()) {
        // Looks like a success to the sender, but nothing is stored
        tracing::debug!(%ip, "Honeypot filled, dropping feedback");
        form.clear();
        looks_submitted = true;
        Some(Notice::submitted())
    } else if let Err(retry_after) = state.submission_limiter.check_submission(ip, &form) {
        tracing::debug!(%ip, "Feedback rate limited");
        Some(Notice::rate_limited(retry_after))
    } else {
        let outcome = form
            .submit(state.store.as_ref(), || submitted = true)
            .await;
        looks_submitted = outcome.is_submitted();
        outcome.notice()
    };

    let form_html = render_form(&form, notice.as_ref())?;

    if is_htmx {
        let mut response = Html(form_html).into_response();
        if submitted {
            response
                .headers_mut()
                .insert("hx-trigger", HeaderValue::from_static(FEEDBACK_SUBMITTED));
        }
        return Ok(response);
    }

    if looks_submitted {
        return Ok(Redirect::to(SUBMITTED_LOCATION).into_response());
    }

    let latest_html = latest::render_latest(&state).await?;
    page(form_html, latest_html, false)
}
