//! Literal equality validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{RuleContext, ValidationRule};
use crate::values::FieldValue;
use serde_json::Value;

/// Validator requiring a field to hold one exact value, such as a
/// checkbox that must be ticked.
#[derive(Debug, Clone)]
pub struct LiteralValidator {
    /// The only accepted value
    pub expected: FieldValue,
    /// Custom error message
    pub message: Option<String>,
}

impl LiteralValidator {
    pub fn new(expected: impl Into<FieldValue>) -> Self {
        Self {
            expected: expected.into(),
            message: None,
        }
    }

    /// Shorthand for a checkbox that must be checked
    pub fn accepted() -> Self {
        Self::new(true)
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for LiteralValidator {
    fn validate(
        &self,
        field: &str,
        value: &FieldValue,
        _ctx: &RuleContext<'_>,
    ) -> ValidationResult<()> {
        // No empty-value shortcut: an unchecked box is exactly what fails here
        if value.same_content(&self.expected) {
            return Ok(());
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("{} must be {}", field, self.expected));

        Err(ValidationError::with_code(field, message, "literal_mismatch"))
    }

    fn rule_name(&self) -> &'static str {
        "equals_literal"
    }

    fn parameters(&self) -> Option<Value> {
        serde_json::to_value(&self.expected)
            .ok()
            .map(|expected| serde_json::json!({ "expected": expected }))
    }
}
