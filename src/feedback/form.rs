use crate::models::{FeedbackRecord, NewFeedback, ValidationError};
use crate::store::{FeedbackStore, StoreError};

use super::notice::Notice;

/// Editable state of one feedback form.
///
/// `is_submitting` is set between `begin` and `finish`. While it is set the
/// submit control renders disabled and a second `begin` is ignored, so a
/// single form never has two requests in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionForm {
    pub name: String,
    pub email: String,
    pub feedback: String,
    is_submitting: bool,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing was sent.
    Ignored,
    Invalid(ValidationError),
    Submitted(FeedbackRecord),
    Failed(StoreError),
}

impl SubmitOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SubmitOutcome::Ignored => None,
            SubmitOutcome::Invalid(_) => Some(Notice::missing_fields()),
            SubmitOutcome::Submitted(_) => Some(Notice::submitted()),
            SubmitOutcome::Failed(err) => {
                Some(Notice::submission_failed(err.user_message().as_deref()))
            }
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

impl SubmissionForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        feedback: impl Into<String>,
    ) -> Self {
        SubmissionForm {
            name: name.into(),
            email: email.into(),
            feedback: feedback.into(),
            is_submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn validate(&self) -> Result<NewFeedback, ValidationError> {
        NewFeedback::parse(&self.name, &self.email, &self.feedback)
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.feedback.clear();
    }

    /// Validate and mark the form as in flight.
    ///
    /// Returns the insert payload, or the outcome to report when nothing
    /// should be sent.
    pub fn begin(&mut self) -> Result<NewFeedback, SubmitOutcome> {
        if self.is_submitting {
            return Err(SubmitOutcome::Ignored);
        }

        let new = self.validate().map_err(|err| {
            tracing::debug!("Feedback rejected: {err}");
            SubmitOutcome::Invalid(err)
        })?;

        self.is_submitting = true;
        Ok(new)
    }

    /// Apply the store's answer to a submission started with `begin`.
    pub fn finish<F>(
        &mut self,
        result: Result<FeedbackRecord, StoreError>,
        on_success: F,
    ) -> SubmitOutcome
    where
        F: FnOnce(),
    {
        self.is_submitting = false;

        match result {
            Ok(record) => {
                tracing::info!(id = %record.id, "Feedback submitted");
                self.clear();
                on_success();
                SubmitOutcome::Submitted(record)
            }
            Err(err) => {
                tracing::warn!("Feedback submission failed: {err}");
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Validate and send one insert to `store`.
    ///
    /// On success the fields are cleared and `on_success` runs once. On any
    /// failure the fields keep their values so the form can be resubmitted.
    pub async fn submit<F>(&mut self, store: &dyn FeedbackStore, on_success: F) -> SubmitOutcome
    where
        F: FnOnce(),
    {
        let new = match self.begin() {
            Ok(new) => new,
            Err(outcome) => return outcome,
        };

        let result = {
            let _in_flight = InFlight(&mut self.is_submitting);
            store.insert(&new).await
        };

        self.finish(result, on_success)
    }
}

/// Clears the in-flight flag even when the submit future is dropped mid-request.
struct InFlight<'a>(&'a mut bool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
