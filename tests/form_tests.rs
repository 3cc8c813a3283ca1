mod common;

use std::time::Duration;

use feedboard::feedback::{NoticeVariant, SubmissionForm, SubmitOutcome};
use feedboard::models::NewFeedback;
use feedboard::store::FeedbackStore;
use feedboard::views::form::render_form;

use common::{FailingStore, StalledStore};

// ── Validation ──────────────────────────────────────────────────

#[tokio::test]
async fn blank_fields_make_no_store_call() {
    let cases = [
        ("", "a@x.com", "Great tool"),
        ("Ann", "", "Great tool"),
        ("Ann", "a@x.com", ""),
        ("   ", "a@x.com", "Great tool"),
        ("Ann", "\t\n", "Great tool"),
        ("Ann", "a@x.com", "  \n "),
        ("", "", ""),
    ];

    for (name, email, feedback) in cases {
        let store = common::memory_store();
        let mut form = SubmissionForm::new(name, email, feedback);
        let mut called = 0;

        let outcome = form.submit(store.as_ref(), || called += 1).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)), "{name:?}/{email:?}/{feedback:?}");
        let notice = outcome.notice().unwrap();
        assert_eq!(notice.title, "Missing fields");
        assert_eq!(notice.variant, NoticeVariant::Destructive);
        assert!(store.is_empty().await);
        assert_eq!(called, 0);
        assert!(!form.is_submitting());
        // Nothing is cleared on a rejected submit
        assert_eq!(form.name, name);
        assert_eq!(form.email, email);
        assert_eq!(form.feedback, feedback);
    }
}

#[test]
fn validation_reports_every_missing_field() {
    let err = NewFeedback::parse(" ", "a@x.com", "").unwrap_err();
    assert_eq!(err.missing, vec!["name", "feedback"]);
}

#[test]
fn validation_trims_values() {
    let new = NewFeedback::parse("  Ann ", "\ta@x.com\n", " Great tool  ").unwrap();
    assert_eq!(new.name(), "Ann");
    assert_eq!(new.email(), "a@x.com");
    assert_eq!(new.feedback(), "Great tool");
}

// ── Success ─────────────────────────────────────────────────────

#[tokio::test]
async fn valid_submit_inserts_once_with_trimmed_values() {
    let store = common::memory_store();
    let mut form = SubmissionForm::new("  Ann ", " a@x.com", "Great tool\n");
    let mut called = 0;

    let outcome = form.submit(store.as_ref(), || called += 1).await;

    let SubmitOutcome::Submitted(record) = &outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(record.name, "Ann");

    let records = store.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Ann");
    assert_eq!(records[0].email, "a@x.com");
    assert_eq!(records[0].feedback, "Great tool");

    assert_eq!(called, 1);
    assert!(!form.is_submitting());
    assert_eq!(form, SubmissionForm::default());

    let notice = outcome.notice().unwrap();
    assert_eq!(notice.title, "Thank you!");
    assert_eq!(notice.variant, NoticeVariant::Info);
}

#[tokio::test]
async fn cleared_form_can_submit_again() {
    let store = common::memory_store();
    let mut form = SubmissionForm::new("Ann", "a@x.com", "First");
    assert!(form.submit(store.as_ref(), || {}).await.is_submitted());

    // Fields were cleared, so a second submit is a validation failure
    assert!(matches!(
        form.submit(store.as_ref(), || {}).await,
        SubmitOutcome::Invalid(_)
    ));

    form.name = "Ann".into();
    form.email = "a@x.com".into();
    form.feedback = "Second".into();
    assert!(form.submit(store.as_ref(), || {}).await.is_submitted());

    assert_eq!(store.len().await, 2);
}

// ── Failure ─────────────────────────────────────────────────────

#[tokio::test]
async fn failed_submit_keeps_fields_and_reports_message() {
    let store = FailingStore::new(Some("duplicate key value violates unique constraint"));
    let mut form = SubmissionForm::new("Ann", "a@x.com", "Great tool");
    let mut called = 0;

    let outcome = form.submit(&store, || called += 1).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(store.insert_count(), 1);
    assert_eq!(called, 0);
    assert!(!form.is_submitting());
    assert_eq!(form.name, "Ann");
    assert_eq!(form.email, "a@x.com");
    assert_eq!(form.feedback, "Great tool");

    let notice = outcome.notice().unwrap();
    assert_eq!(notice.title, "Submission failed");
    assert_eq!(notice.description, "duplicate key value violates unique constraint");
    assert_eq!(notice.variant, NoticeVariant::Destructive);
}

#[tokio::test]
async fn failure_without_message_uses_generic_description() {
    let store = FailingStore::new(None);
    let mut form = SubmissionForm::new("Ann", "a@x.com", "Great tool");

    let outcome = form.submit(&store, || {}).await;

    let notice = outcome.notice().unwrap();
    assert_eq!(notice.description, "Something went wrong. Please try again.");
}

#[tokio::test]
async fn failed_submit_is_not_retried() {
    let store = FailingStore::new(Some("offline"));
    let mut form = SubmissionForm::new("Ann", "a@x.com", "Great tool");

    form.submit(&store, || {}).await;
    assert_eq!(store.insert_count(), 1);

    // Resubmitting is the caller's decision
    form.submit(&store, || {}).await;
    assert_eq!(store.insert_count(), 2);
}

// ── In-flight guard ─────────────────────────────────────────────

#[tokio::test]
async fn second_submit_while_in_flight_is_ignored() {
    let store = common::memory_store();
    let mut form = SubmissionForm::new("Ann", "a@x.com", "Great tool");

    let new = form.begin().unwrap();
    assert!(form.is_submitting());
    assert_eq!(new.name(), "Ann");

    // Both the split and the async entry points refuse while in flight
    assert!(matches!(form.begin(), Err(SubmitOutcome::Ignored)));
    let mut called = 0;
    let outcome = form.submit(store.as_ref(), || called += 1).await;
    assert!(matches!(outcome, SubmitOutcome::Ignored));
    assert!(outcome.notice().is_none());
    assert!(store.is_empty().await);
    assert_eq!(called, 0);
    assert_eq!(form.name, "Ann");

    let record = store.insert(&new).await.unwrap();
    let outcome = form.finish(Ok(record), || called += 1);
    assert!(outcome.is_submitted());
    assert!(!form.is_submitting());
    assert_eq!(called, 1);
    assert_eq!(form, SubmissionForm::default());
}

#[tokio::test]
async fn in_flight_form_renders_disabled_button() {
    let mut form = SubmissionForm::new("Ann", "a@x.com", "Great tool");

    let idle = render_form(&form, None).unwrap();
    assert!(!idle.contains(r#"class="button" disabled"#));

    form.begin().unwrap();
    let busy = render_form(&form, None).unwrap();
    assert!(busy.contains(r#"class="button" disabled"#));
    assert!(busy.contains("Submitting..."));
}

#[tokio::test]
async fn dropped_submit_clears_in_flight_flag() {
    let mut form = SubmissionForm::new("Ann", "a@x.com", "Great tool");

    let timed_out = tokio::time::timeout(
        Duration::from_millis(20),
        form.submit(&StalledStore, || {}),
    )
    .await;
    assert!(timed_out.is_err());
    assert!(!form.is_submitting());
    assert_eq!(form.name, "Ann");

    // The form is usable again
    let store = common::memory_store();
    assert!(form.submit(store.as_ref(), || {}).await.is_submitted());
    assert_eq!(store.len().await, 1);
}
