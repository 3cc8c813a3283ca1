use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored feedback submission. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload. Only built by validation, so every field is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFeedback {
    name: String,
    email: String,
    feedback: String,
}

/// A required field was empty after trimming.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Missing fields: {}", self.missing.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl NewFeedback {
    pub fn parse(name: &str, email: &str, feedback: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        let email = email.trim();
        let feedback = feedback.trim();

        let missing: Vec<&'static str> = [("name", name), ("email", email), ("feedback", feedback)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        Ok(NewFeedback {
            name: name.to_string(),
            email: email.to_string(),
            feedback: feedback.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}
