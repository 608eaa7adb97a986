//! Required field validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{RuleContext, ValidationRule};
use crate::values::FieldValue;
use serde_json::Value;

/// Validator that ensures a field is not left empty
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl RequiredValidator {
    /// Create a new required validator with default message
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Create a required validator with custom message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl ValidationRule for RequiredValidator {
    fn validate(
        &self,
        field: &str,
        value: &FieldValue,
        _ctx: &RuleContext<'_>,
    ) -> ValidationResult<()> {
        // Whitespace counts as content; only the empty string is missing.
        if value.is_empty() {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} is required", field));

            Err(ValidationError::with_code(field, message, "required"))
        } else {
            Ok(())
        }
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        self.message.as_ref().map(|msg| {
            serde_json::json!({
                "message": msg
            })
        })
    }
}
