//! End-to-end lifecycle of the registration form session

use chrono::{TimeZone, Utc};
use formflow_core::{
    Clock, FixedClock, FormError, FormSession, SessionConfig, SessionConfigBuilder,
    SimulatedSubmitter, SubmissionState, SubmitOutcome, Trigger,
};
use formflow_validation::{fields, FieldValue, FormValues};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap(),
    ))
}

fn session() -> FormSession {
    let clock = clock();
    let submitter = Arc::new(SimulatedSubmitter::new(clock.clone(), Duration::from_secs(1)));
    FormSession::registration(submitter, clock, SessionConfig::default()).unwrap()
}

fn failing_session() -> FormSession {
    let clock = clock();
    let submitter = Arc::new(
        SimulatedSubmitter::new(clock.clone(), Duration::from_secs(1))
            .failing_with("service unavailable"),
    );
    FormSession::registration(submitter, clock, SessionConfig::default()).unwrap()
}

fn fill(session: &mut FormSession, first_name: &str) {
    let values = [
        (fields::FIRST_NAME, FieldValue::text(first_name)),
        (fields::LAST_NAME, FieldValue::text("Kovalenko")),
        (fields::EMAIL, FieldValue::text("olena@example.com")),
        (fields::PASSWORD, FieldValue::text("Abcdefg1")),
        (fields::CONFIRM_PASSWORD, FieldValue::text("Abcdefg1")),
        (fields::PHONE, FieldValue::text("+38 (050) 123-45-67")),
        (fields::BIRTH_DATE, FieldValue::text("1995-08-24")),
        (fields::TERMS, FieldValue::Bool(true)),
    ];
    for (field, value) in values {
        session.on_change(field, value).unwrap();
        session.on_blur(field).unwrap();
    }
}

fn succeeded_values(outcome: SubmitOutcome) -> FormValues {
    match outcome {
        SubmitOutcome::Succeeded(values) => values,
        SubmitOutcome::Rejected(errors) => panic!("unexpected rejection: {}", errors),
    }
}

#[tokio::test(start_paused = true)]
async fn valid_submit_succeeds_and_resets_fields() {
    let mut session = session();
    fill(&mut session, "Olena");
    let entered = session.fields().values().clone();

    let values = succeeded_values(session.submit().await.unwrap());

    assert_eq!(
        session.history().states(),
        vec![
            SubmissionState::Idle,
            SubmissionState::Submitting,
            SubmissionState::Succeeded
        ]
    );
    assert_eq!(values, entered);
    assert_eq!(session.last_success(), Some(&entered));

    let fresh = self::session();
    assert_eq!(session.fields().values(), fresh.fields().values());
    assert!(!session.fields().is_touched(fields::FIRST_NAME));
    assert!(!session.fields().submit_attempted());
    assert!(!session.fields().should_show_error(fields::FIRST_NAME));
}

#[tokio::test(start_paused = true)]
async fn success_notice_disappears_after_window() {
    let mut session = session();
    fill(&mut session, "Olena");
    session.submit().await.unwrap();

    sleep(Duration::from_millis(4900)).await;
    assert_eq!(session.process_pending(), 0);
    assert_eq!(session.state(), SubmissionState::Succeeded);
    assert!(session.view().success_message.is_some());

    sleep(Duration::from_millis(200)).await;
    assert_eq!(session.process_pending(), 1);
    assert_eq!(session.state(), SubmissionState::Idle);
    assert!(session.last_success().is_none());
    assert!(session.view().success_message.is_none());
    assert_eq!(session.history().last().map(|t| t.trigger), Some(Trigger::AutoReset));
}

#[tokio::test(start_paused = true)]
async fn resubmit_cancels_previous_auto_reset() {
    let mut session = session();
    fill(&mut session, "Olena");
    session.submit().await.unwrap();

    // One unit into the first success window
    sleep(Duration::from_secs(1)).await;
    fill(&mut session, "Taras");
    let second = succeeded_values(session.submit().await.unwrap());
    assert_eq!(second.text(fields::FIRST_NAME), "Taras");

    // The first timer would have fired here
    sleep(Duration::from_millis(3500)).await;
    assert_eq!(session.process_pending(), 0);
    assert_eq!(session.state(), SubmissionState::Succeeded);
    assert_eq!(
        session.last_success().map(|v| v.text(fields::FIRST_NAME)),
        Some("Taras")
    );

    session.settle().await;
    assert_eq!(session.state(), SubmissionState::Idle);
    assert_eq!(
        session.history().states(),
        vec![
            SubmissionState::Idle,
            SubmissionState::Submitting,
            SubmissionState::Succeeded,
            SubmissionState::Submitting,
            SubmissionState::Succeeded,
            SubmissionState::Idle,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn rejected_resubmit_keeps_success_window() {
    let mut session = session();
    fill(&mut session, "Olena");
    session.submit().await.unwrap();

    // Fields were reset, so a second click is rejected by validation
    let outcome = session.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert_eq!(session.state(), SubmissionState::Succeeded);
    assert!(session.has_pending_reset());
    assert!(session.fields().should_show_error(fields::EMAIL));

    session.settle().await;
    assert_eq!(session.state(), SubmissionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn errors_show_after_blur_or_submit_attempt() {
    let mut session = session();
    session.on_change(fields::EMAIL, "not-an-email").unwrap();

    assert!(!session.fields().should_show_error(fields::EMAIL));
    assert_eq!(session.field_view(fields::EMAIL).unwrap().error, None);

    session.on_blur(fields::EMAIL).unwrap();
    assert_eq!(
        session.field_view(fields::EMAIL).unwrap().error.as_deref(),
        Some("Invalid email format")
    );
    assert!(!session.fields().should_show_error(fields::PHONE));

    let outcome = session.submit().await.unwrap();
    let errors = match outcome {
        SubmitOutcome::Rejected(errors) => errors,
        other => panic!("expected rejection, got {:?}", other),
    };
    assert_eq!(errors.message(fields::PHONE), Some("Phone number is required"));
    assert!(session.fields().should_show_error(fields::PHONE));
    assert_eq!(session.state(), SubmissionState::Idle);
    assert!(session.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn evaluation_is_idempotent() {
    let mut session = session();
    fill(&mut session, "Olena");
    session.on_change(fields::CONFIRM_PASSWORD, "Abcdefg2").unwrap();

    let first = session.snapshot();
    let second = session.snapshot();
    assert_eq!(first, second);

    let rules = session.fields().rules();
    let now = clock().now();
    assert_eq!(
        rules.evaluate(&first.values, now),
        rules.evaluate(&first.values, now)
    );
    assert_eq!(
        first.errors.message(fields::CONFIRM_PASSWORD),
        Some("Passwords do not match")
    );
}

#[tokio::test(start_paused = true)]
async fn future_birth_date_blocks_submit() {
    let mut session = session();
    fill(&mut session, "Olena");
    session
        .on_change(fields::BIRTH_DATE, FieldValue::date("2025-03-11"))
        .unwrap();

    let outcome = session.submit().await.unwrap();
    let errors = match outcome {
        SubmitOutcome::Rejected(errors) => errors,
        other => panic!("expected rejection, got {:?}", other),
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.message(fields::BIRTH_DATE),
        Some("Birth date cannot be in the future")
    );
}

#[tokio::test(start_paused = true)]
async fn date_checks_use_the_instant_of_submission() {
    let clock = clock();
    let submitter = Arc::new(SimulatedSubmitter::new(clock.clone(), Duration::ZERO));
    let mut session =
        FormSession::registration(submitter, clock.clone(), SessionConfig::default()).unwrap();
    fill(&mut session, "Olena");
    session
        .on_change(fields::BIRTH_DATE, FieldValue::date("2025-03-11"))
        .unwrap();
    assert!(!session.fields().is_valid());

    // The next day the same date is no longer in the future
    clock.advance(chrono::Duration::days(1));
    assert!(session.submit().await.unwrap().is_success());
}

#[tokio::test(start_paused = true)]
async fn collaborator_failure_returns_to_idle() {
    let mut session = failing_session();
    fill(&mut session, "Olena");

    let error = session.submit().await.unwrap_err();
    assert!(matches!(error, FormError::Submission(ref f) if f.reason == "service unavailable"));
    assert_eq!(session.state(), SubmissionState::Idle);
    assert_eq!(session.fields().values().text(fields::FIRST_NAME), "Olena");
    assert!(session.fields().is_touched(fields::FIRST_NAME));
    assert!(session.last_success().is_none());
    assert!(!session.has_pending_reset());
    assert_eq!(
        session.history().states(),
        vec![
            SubmissionState::Idle,
            SubmissionState::Submitting,
            SubmissionState::Idle
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn custom_auto_reset_window() {
    let clock = clock();
    let submitter = Arc::new(SimulatedSubmitter::new(clock.clone(), Duration::ZERO));
    let config = SessionConfigBuilder::new()
        .auto_reset_after(Duration::from_secs(2))
        .build()
        .expect("Failed to build config");
    let mut session = FormSession::registration(submitter, clock, config).unwrap();
    fill(&mut session, "Olena");
    session.submit().await.unwrap();

    let started = tokio::time::Instant::now();
    session.settle().await;
    let waited = started.elapsed();
    assert!(waited >= Duration::from_secs(2) && waited < Duration::from_secs(3));
    assert_eq!(session.state(), SubmissionState::Idle);
}
