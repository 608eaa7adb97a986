//! Submission lifecycle of one form session
//!
//! ```text
//! Idle ──submit (valid)──▶ Submitting ──collaborator ok──▶ Succeeded
//!  ▲                           │                             │  │
//!  └──── collaborator failed ──┘                             │  │
//!  └──────────────── auto-reset window elapsed ──────────────┘  │
//!                 Submitting ◀──submit (valid)──────────────────┘
//! ```
//!
//! The auto-reset timer runs as a spawned task that posts a
//! [`SessionEvent`] back to the session. Every armed timer carries a
//! generation number; cancelling aborts the task and bumps the
//! generation, so an event that was already queued is recognised as stale.

use crate::clock::Clock;
use crate::config::SessionConfig;
use crate::error::{FormError, FormResult, SubmitFailure};
use crate::field::{FieldController, FormSnapshot};
use crate::submitter::Submitter;
use chrono::{DateTime, Utc};
use formflow_validation::{
    fields, registration_rules, FieldValue, FormValues, MessageCatalog, Rules, ValidationErrors,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Where a session is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
        }
    }

    /// Inputs and the submit button are disabled
    pub fn is_locked(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What caused a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    SubmitAccepted,
    CollaboratorSucceeded,
    CollaboratorFailed,
    AutoReset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTransition {
    pub from: SubmissionState,
    pub to: SubmissionState,
    pub trigger: Trigger,
    pub at: DateTime<Utc>,
}

/// Every state change of a session, oldest first
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TransitionLog {
    entries: Vec<StateTransition>,
}

impl TransitionLog {
    fn record(&mut self, transition: StateTransition) {
        self.entries.push(transition);
    }

    pub fn entries(&self) -> &[StateTransition] {
        &self.entries
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.entries.last()
    }

    /// States visited, starting with the initial one
    pub fn states(&self) -> Vec<SubmissionState> {
        let mut states: Vec<_> = self.entries.first().map(|t| t.from).into_iter().collect();
        states.extend(self.entries.iter().map(|t| t.to));
        states
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Asynchronous input delivered to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    AutoReset { generation: u64 },
}

/// Proof that the submit guard passed; redeem it with
/// [`FormSession::complete_submit`]
#[derive(Debug)]
pub struct SubmitTicket {
    values: FormValues,
    accepted_at: DateTime<Utc>,
}

impl SubmitTicket {
    /// Values handed to the collaborator
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn accepted_at(&self) -> DateTime<Utc> {
        self.accepted_at
    }
}

/// Result of the guarded submit transition
#[derive(Debug)]
pub enum SubmitAttempt {
    Accepted(SubmitTicket),
    Rejected(ValidationErrors),
}

/// Result of a whole submit cycle that did not fail in the collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Succeeded(FormValues),
    Rejected(ValidationErrors),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

/// What the renderer shows for one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub field: String,
    pub value: FieldValue,
    /// Present only when the error should be displayed
    pub error: Option<String>,
    pub touched: bool,
    pub disabled: bool,
}

/// What the renderer shows for the form as a whole
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub state: SubmissionState,
    pub last_success: Option<FormValues>,
    pub submit_attempted: bool,
    pub success_message: Option<String>,
}

struct ResetTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// One form, its fields and its submission state machine.
///
/// Must be driven from inside a Tokio runtime; the auto-reset timer is a
/// spawned task.
pub struct FormSession {
    id: Uuid,
    fields: FieldController,
    state: SubmissionState,
    last_success: Option<FormValues>,
    messages: MessageCatalog,
    submitter: Arc<dyn Submitter>,
    clock: Arc<dyn Clock>,
    config: SessionConfig,
    history: TransitionLog,
    timer: Option<ResetTimer>,
    generation: u64,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl FormSession {
    pub fn new(
        rules: Rules,
        messages: MessageCatalog,
        submitter: Arc<dyn Submitter>,
        clock: Arc<dyn Clock>,
        config: SessionConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        debug!(session_id = %id, fields = rules.field_names().len(), "form session created");

        Self {
            id,
            fields: FieldController::new(Arc::new(rules), Arc::clone(&clock)),
            state: SubmissionState::Idle,
            last_success: None,
            messages,
            submitter,
            clock,
            config,
            history: TransitionLog::default(),
            timer: None,
            generation: 0,
            events_tx,
            events_rx,
        }
    }

    /// Session over the registration form, worded in the configured locale
    pub fn registration(
        submitter: Arc<dyn Submitter>,
        clock: Arc<dyn Clock>,
        config: SessionConfig,
    ) -> FormResult<Self> {
        let messages = config.get_locale().catalog();
        let rules = registration_rules(&messages)?;
        Ok(Self::new(rules, messages, submitter, clock, config))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state.
    ///
    /// An elapsed auto-reset window is only applied once its event is pumped
    /// through [`process_pending`](Self::process_pending),
    /// [`settle`](Self::settle) or [`handle_event`](Self::handle_event); until
    /// then this still reports `Succeeded`.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn fields(&self) -> &FieldController {
        &self.fields
    }

    pub fn history(&self) -> &TransitionLog {
        &self.history
    }

    pub fn last_success(&self) -> Option<&FormValues> {
        self.last_success.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// An auto-reset timer is armed and has not fired yet
    pub fn has_pending_reset(&self) -> bool {
        self.timer.is_some()
    }

    pub fn on_change(&mut self, field: &str, value: impl Into<FieldValue>) -> FormResult<()> {
        if self.state.is_locked() {
            return Err(FormError::FieldsLocked);
        }
        self.fields.on_change(field, value)
    }

    pub fn on_blur(&mut self, field: &str) -> FormResult<()> {
        self.fields.on_blur(field)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.fields.snapshot()
    }

    /// The guarded transition into `Submitting`.
    ///
    /// Marks the form as submit-attempted and re-evaluates it. An invalid
    /// form leaves the state alone and comes back as `Rejected`. A valid one
    /// cancels any pending auto-reset, drops the previous success and moves
    /// to `Submitting`.
    pub fn begin_submit(&mut self) -> FormResult<SubmitAttempt> {
        if self.state == SubmissionState::Submitting {
            warn!(session_id = %self.id, "submit ignored, a submission is already in flight");
            return Err(FormError::SubmissionInFlight);
        }

        self.fields.mark_submit_attempted();
        let errors = self.fields.revalidate();
        if !errors.is_empty() {
            warn!(
                session_id = %self.id,
                state = %self.state,
                invalid = errors.len(),
                "submit rejected by validation"
            );
            return Ok(SubmitAttempt::Rejected(errors.clone()));
        }

        if self.state == SubmissionState::Succeeded {
            self.cancel_auto_reset();
            self.last_success = None;
        }

        let ticket = SubmitTicket {
            values: self.fields.values().clone(),
            accepted_at: self.clock.now(),
        };
        self.transition(SubmissionState::Submitting, Trigger::SubmitAccepted);
        Ok(SubmitAttempt::Accepted(ticket))
    }

    /// Apply the collaborator's answer to an accepted submission
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<(), SubmitFailure>,
    ) -> FormResult<SubmitOutcome> {
        if self.state != SubmissionState::Submitting {
            return Err(FormError::NotSubmitting);
        }

        match result {
            Ok(()) => {
                self.last_success = Some(ticket.values.clone());
                self.fields.reset();
                self.transition(SubmissionState::Succeeded, Trigger::CollaboratorSucceeded);
                self.arm_auto_reset();
                Ok(SubmitOutcome::Succeeded(ticket.values))
            }
            Err(failure) => {
                error!(
                    session_id = %self.id,
                    reason = %failure.reason,
                    "submit collaborator failed"
                );
                self.transition(SubmissionState::Idle, Trigger::CollaboratorFailed);
                Err(FormError::Submission(failure))
            }
        }
    }

    /// Run a whole submit cycle: guard, collaborator, outcome
    pub async fn submit(&mut self) -> FormResult<SubmitOutcome> {
        let ticket = match self.begin_submit()? {
            SubmitAttempt::Accepted(ticket) => ticket,
            SubmitAttempt::Rejected(errors) => return Ok(SubmitOutcome::Rejected(errors)),
        };

        let submitter = Arc::clone(&self.submitter);
        let result = submitter.submit(ticket.values()).await;
        self.complete_submit(ticket, result)
    }

    /// Apply one event. Returns whether it changed anything.
    pub fn handle_event(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::AutoReset { generation } => {
                if generation != self.generation || self.state != SubmissionState::Succeeded {
                    debug!(
                        session_id = %self.id,
                        generation,
                        current = self.generation,
                        state = %self.state,
                        "stale auto-reset ignored"
                    );
                    return false;
                }

                self.timer = None;
                self.last_success = None;
                self.transition(SubmissionState::Idle, Trigger::AutoReset);
                true
            }
        }
    }

    /// Apply every event already delivered, without waiting
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.handle_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next event.
    ///
    /// Returns `None` straight away when nothing is queued and no timer is
    /// armed, since no event can arrive then.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        if let Ok(event) = self.events_rx.try_recv() {
            return Some(event);
        }
        if self.timer.is_none() {
            return None;
        }
        self.events_rx.recv().await
    }

    /// Handle events until none can arrive anymore
    pub async fn settle(&mut self) {
        while let Some(event) = self.next_event().await {
            self.handle_event(event);
        }
    }

    pub fn field_view(&self, field: &str) -> FormResult<FieldView> {
        let value = self
            .fields
            .value(field)
            .cloned()
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;

        Ok(FieldView {
            field: field.to_string(),
            value,
            error: self.fields.visible_error(field).map(str::to_string),
            touched: self.fields.is_touched(field),
            disabled: self.state.is_locked(),
        })
    }

    /// Views of every field in declaration order
    pub fn field_views(&self) -> Vec<FieldView> {
        self.fields
            .rules()
            .field_names()
            .into_iter()
            .filter_map(|field| self.field_view(field).ok())
            .collect()
    }

    /// Display snapshot of the session. Like [`state`](Self::state), it
    /// reflects an expired success notice only after pending events are pumped.
    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            state: self.state,
            last_success: self.last_success.clone(),
            submit_attempted: self.fields.submit_attempted(),
            success_message: self.success_message(),
        }
    }

    /// Confirmation shown while the session is `Succeeded`
    pub fn success_message(&self) -> Option<String> {
        self.last_success.as_ref().map(|values| {
            self.messages
                .success_notice(values.text(fields::FIRST_NAME), values.text(fields::LAST_NAME))
        })
    }

    fn transition(&mut self, to: SubmissionState, trigger: Trigger) {
        let from = self.state;
        self.state = to;
        info!(
            session_id = %self.id,
            from = %from,
            to = %to,
            trigger = ?trigger,
            "submission state changed"
        );
        self.history.record(StateTransition {
            from,
            to,
            trigger,
            at: self.clock.now(),
        });
    }

    fn arm_auto_reset(&mut self) {
        self.cancel_auto_reset();

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(session_id = %self.id, "no async runtime, auto-reset disabled");
                return;
            }
        };

        let generation = self.generation;
        let delay = *self.config.get_auto_reset_after();
        let clock = Arc::clone(&self.clock);
        let events = self.events_tx.clone();
        let handle = runtime.spawn(async move {
            clock.sleep(delay).await;
            // The receiver lives as long as the session
            let _ = events.send(SessionEvent::AutoReset { generation });
        });

        debug!(
            session_id = %self.id,
            generation,
            delay_ms = delay.as_millis() as u64,
            "auto-reset armed"
        );
        self.timer = Some(ResetTimer { generation, handle });
    }

    fn cancel_auto_reset(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.handle.abort();
            debug!(session_id = %self.id, generation = timer.generation, "auto-reset cancelled");
        }
        self.generation += 1;
    }
}

impl Drop for FormSession {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    #[derive(Default)]
    struct RecordingSubmitter {
        calls: Mutex<Vec<FormValues>>,
        failure: Option<String>,
    }

    impl RecordingSubmitter {
        fn failing(reason: &str) -> Self {
            Self {
                failure: Some(reason.to_string()),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<FormValues> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Submitter for RecordingSubmitter {
        async fn submit(&self, values: &FormValues) -> Result<(), SubmitFailure> {
            self.calls.lock().unwrap().push(values.clone());
            match &self.failure {
                Some(reason) => Err(SubmitFailure::new(reason.as_str())),
                None => Ok(()),
            }
        }
    }

    fn session_with(submitter: Arc<RecordingSubmitter>) -> FormSession {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap());
        FormSession::registration(submitter, Arc::new(clock), SessionConfig::default()).unwrap()
    }

    fn fill(session: &mut FormSession) {
        let values = [
            (fields::FIRST_NAME, FieldValue::text("Olena")),
            (fields::LAST_NAME, FieldValue::text("Kovalenko")),
            (fields::EMAIL, FieldValue::text("olena@example.com")),
            (fields::PASSWORD, FieldValue::text("Abcdefg1")),
            (fields::CONFIRM_PASSWORD, FieldValue::text("Abcdefg1")),
            (fields::PHONE, FieldValue::text("+380501234567")),
            (fields::BIRTH_DATE, FieldValue::date("1995-08-24")),
            (fields::TERMS, FieldValue::Bool(true)),
        ];
        for (field, value) in values {
            session.on_change(field, value).unwrap();
        }
    }

    #[test]
    fn test_state_names() {
        assert_eq!(SubmissionState::Idle.to_string(), "idle");
        assert!(SubmissionState::Submitting.is_locked());
        assert!(!SubmissionState::Succeeded.is_locked());
    }

    #[tokio::test]
    async fn test_invalid_submit_is_rejected_without_calling_collaborator() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut session = session_with(submitter.clone());

        let outcome = assert_ok!(session.submit().await);
        match outcome {
            SubmitOutcome::Rejected(errors) => assert_eq!(errors.len(), fields::ALL.len()),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(session.state(), SubmissionState::Idle);
        assert!(session.view().submit_attempted);
        assert!(session.history().is_empty());
        assert!(submitter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fields_locked_while_submitting() {
        let mut session = session_with(Arc::new(RecordingSubmitter::default()));
        fill(&mut session);

        let ticket = match session.begin_submit().unwrap() {
            SubmitAttempt::Accepted(ticket) => ticket,
            SubmitAttempt::Rejected(errors) => panic!("unexpected rejection: {}", errors),
        };
        assert_eq!(ticket.values().text(fields::FIRST_NAME), "Olena");
        assert!(session.field_view(fields::EMAIL).unwrap().disabled);
        assert!(matches!(
            session.on_change(fields::EMAIL, "other@example.com"),
            Err(FormError::FieldsLocked)
        ));
        assert!(matches!(
            session.begin_submit(),
            Err(FormError::SubmissionInFlight)
        ));

        session.complete_submit(ticket, Ok(())).unwrap();
        assert_eq!(session.state(), SubmissionState::Succeeded);
        assert!(!session.field_view(fields::EMAIL).unwrap().disabled);
    }

    #[tokio::test]
    async fn test_collaborator_failure_keeps_fields() {
        let submitter = Arc::new(RecordingSubmitter::failing("backend unavailable"));
        let mut session = session_with(submitter.clone());
        fill(&mut session);

        let error = assert_err!(session.submit().await);
        assert!(matches!(error, FormError::Submission(ref f) if f.reason == "backend unavailable"));
        assert_eq!(session.state(), SubmissionState::Idle);
        assert_eq!(session.fields().values().text(fields::FIRST_NAME), "Olena");
        assert!(session.fields().is_valid());
        assert!(!session.has_pending_reset());
        assert_eq!(submitter.calls().len(), 1);
        assert_eq!(
            session.history().last().map(|t| t.trigger),
            Some(Trigger::CollaboratorFailed)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_auto_reset_is_ignored() {
        let mut session = session_with(Arc::new(RecordingSubmitter::default()));
        fill(&mut session);
        session.submit().await.unwrap();

        let stale = SessionEvent::AutoReset {
            generation: session.generation.wrapping_sub(1),
        };
        assert!(!session.handle_event(stale));
        assert_eq!(session.state(), SubmissionState::Succeeded);

        let current = SessionEvent::AutoReset {
            generation: session.generation,
        };
        assert!(session.handle_event(current));
        assert_eq!(session.state(), SubmissionState::Idle);
        assert!(session.last_success().is_none());

        // Already idle, so even a matching generation is ignored now
        assert!(!session.handle_event(current));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_window_applies_only_when_pumped() {
        let mut session = session_with(Arc::new(RecordingSubmitter::default()));
        fill(&mut session);
        session.submit().await.unwrap();

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(session.state(), SubmissionState::Succeeded);
        assert!(session.view().success_message.is_some());

        assert_eq!(session.process_pending(), 1);
        assert_eq!(session.state(), SubmissionState::Idle);
        assert!(session.view().success_message.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_event_returns_none_without_timer() {
        let mut session = session_with(Arc::new(RecordingSubmitter::default()));
        assert_eq!(session.next_event().await, None);
        assert_eq!(session.process_pending(), 0);

        fill(&mut session);
        session.submit().await.unwrap();
        assert!(session.has_pending_reset());

        let started = tokio::time::Instant::now();
        session.settle().await;
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert_eq!(session.state(), SubmissionState::Idle);
        assert!(!session.has_pending_reset());
    }

    #[tokio::test]
    async fn test_success_view() {
        let mut session = session_with(Arc::new(RecordingSubmitter::default()));
        fill(&mut session);
        session.submit().await.unwrap();

        let view = session.view();
        assert_eq!(view.state, SubmissionState::Succeeded);
        assert!(!view.submit_attempted);
        assert_eq!(
            view.success_message.as_deref(),
            Some("Form submitted successfully! User data for Olena Kovalenko saved")
        );
        assert_eq!(
            view.last_success.as_ref().map(|v| v.text(fields::EMAIL)),
            Some("olena@example.com")
        );

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], "succeeded");
        assert_eq!(json["lastSuccess"]["firstName"], "Olena");
    }

    #[tokio::test]
    async fn test_field_views_follow_declaration_order() {
        let mut session = session_with(Arc::new(RecordingSubmitter::default()));
        session.on_change(fields::FIRST_NAME, "O").unwrap();
        session.on_blur(fields::FIRST_NAME).unwrap();

        let views = session.field_views();
        let names: Vec<_> = views.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(names, fields::ALL.to_vec());
        assert_eq!(
            views[0].error.as_deref(),
            Some("First name must be at least 2 characters")
        );
        assert!(views[0].touched);
        assert_eq!(views[1].error, None);

        assert!(matches!(
            session.field_view("nickname"),
            Err(FormError::UnknownField(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_without_submission_in_flight() {
        let mut session = session_with(Arc::new(RecordingSubmitter::default()));
        fill(&mut session);
        let ticket = match session.begin_submit().unwrap() {
            SubmitAttempt::Accepted(ticket) => ticket,
            SubmitAttempt::Rejected(_) => unreachable!(),
        };
        session.complete_submit(ticket, Err(SubmitFailure::new("timeout"))).unwrap_err();

        let forged = SubmitTicket {
            values: FormValues::new(),
            accepted_at: Utc::now(),
        };
        assert!(matches!(
            session.complete_submit(forged, Ok(())),
            Err(FormError::NotSubmitting)
        ));
    }
}
