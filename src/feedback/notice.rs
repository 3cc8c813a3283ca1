use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Info,
    Destructive,
}

/// Short-lived message shown after an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

impl Notice {
    pub fn info(title: &str, description: &str) -> Self {
        Notice {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Info,
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Notice {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn missing_fields() -> Self {
        Notice::destructive("Missing fields", "Please fill in all fields before submitting.")
    }

    pub fn submitted() -> Self {
        Notice::info("Thank you!", "Your feedback has been submitted successfully.")
    }

    /// Falls back to a generic description when the failure carried no message.
    pub fn submission_failed(message: Option<&str>) -> Self {
        let description = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_FAILURE);
        Notice::destructive("Submission failed", description)
    }

    pub fn rate_limited(retry_after: u64) -> Self {
        Notice::destructive(
            "Too many submissions",
            &format!("Please wait {retry_after}s before submitting again."),
        )
    }

    pub fn load_failed() -> Self {
        Notice::destructive("Could not load feedback", GENERIC_FAILURE)
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}
