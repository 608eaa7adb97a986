use formflow_validation::SchemaError;
use thiserror::Error;

/// Result type used across the session layer
pub type FormResult<T> = Result<T, FormError>;

/// Failure reported by the submit collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("submission failed: {reason}")]
pub struct SubmitFailure {
    pub reason: String,
}

impl SubmitFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors raised by field and session operations.
///
/// A form that does not pass validation is not an error; it is reported
/// through [`crate::SubmitOutcome::Rejected`].
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("No submission is in flight")]
    NotSubmitting,

    #[error("Fields are locked while a submission is in flight")]
    FieldsLocked,

    #[error(transparent)]
    Submission(#[from] SubmitFailure),

    #[error("Invalid form schema: {0}")]
    Schema(#[from] SchemaError),
}

/// Invalid session configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_failure_converts() {
        let error: FormError = SubmitFailure::new("service unavailable").into();
        assert!(matches!(error, FormError::Submission(_)));
        assert_eq!(error.to_string(), "submission failed: service unavailable");
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::invalid("FORMFLOW_LOCALE", "fr", "en or uk");
        assert_eq!(
            error.to_string(),
            "Invalid value for FORMFLOW_LOCALE: 'fr', expected en or uk"
        );
    }
}
