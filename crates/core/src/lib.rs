//! # formflow-core
//!
//! Field state and submission lifecycle for formflow forms.
//!
//! A [`FormSession`] combines a [`FieldController`] (values, touched
//! flags, error visibility) with the `Idle → Submitting → Succeeded`
//! state machine. The submit side effect and the time source are
//! collaborators behind the [`Submitter`] and [`Clock`] traits.
//!
//! ```rust
//! use formflow_core::{FormSession, SessionConfig, SimulatedSubmitter, SystemClock, SubmitOutcome};
//! use formflow_validation::fields;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let clock = Arc::new(SystemClock);
//! let submitter = Arc::new(SimulatedSubmitter::new(clock.clone(), Duration::ZERO));
//! let mut session = FormSession::registration(submitter, clock, SessionConfig::default()).unwrap();
//!
//! session.on_change(fields::FIRST_NAME, "Olena").unwrap();
//! session.on_blur(fields::FIRST_NAME).unwrap();
//!
//! // The rest of the form is still empty
//! let outcome = session.submit().await.unwrap();
//! assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
//! assert!(session.fields().should_show_error(fields::EMAIL));
//! # });
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod field;
pub mod logging;
pub mod submission;
pub mod submitter;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{SessionConfig, SessionConfigBuilder};
pub use error::{ConfigError, FormError, FormResult, SubmitFailure};
pub use field::{FieldController, FormSnapshot};
pub use logging::{init_logging, LoggingConfig};
pub use submission::{
    FieldView, FormSession, SessionEvent, SessionView, StateTransition, SubmissionState,
    SubmitAttempt, SubmitOutcome, SubmitTicket, TransitionLog, Trigger,
};
pub use submitter::{SimulatedSubmitter, Submitter};
