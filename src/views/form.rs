use askama::Template;

use crate::feedback::{Notice, SubmissionForm, honeypot};

#[derive(Template)]
#[template(path = "partials/feedback_form.html")]
struct FeedbackFormTemplate<'a> {
    form: &'a SubmissionForm,
    notice: Option<&'a Notice>,
    honeypot_field: &'static str,
}

pub fn render_form(form: &SubmissionForm, notice: Option<&Notice>) -> Result<String, askama::Error> {
    FeedbackFormTemplate {
        form,
        notice,
        honeypot_field: honeypot::FIELD,
    }
    .render()
}
