//! Cross-field equality validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{RuleContext, ValidationRule};
use crate::values::FieldValue;
use serde_json::Value;

/// Validator requiring a field to equal another field's current value.
///
/// The other field is looked up in the evaluation context on every call,
/// so editing the referenced field is picked up by the next evaluation.
#[derive(Debug, Clone)]
pub struct FieldMatchValidator {
    /// Field whose value must be matched
    pub other: String,
    /// Custom error message
    pub message: Option<String>,
}

impl FieldMatchValidator {
    pub fn new(other: impl Into<String>) -> Self {
        Self {
            other: other.into(),
            message: None,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for FieldMatchValidator {
    fn validate(
        &self,
        field: &str,
        value: &FieldValue,
        ctx: &RuleContext<'_>,
    ) -> ValidationResult<()> {
        if value.is_empty() {
            return Ok(());
        }

        let matches = ctx
            .resolve(&self.other)
            .is_some_and(|other| value.same_content(other));

        if matches {
            Ok(())
        } else {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} must match {}", field, self.other));

            Err(ValidationError::with_code(field, message, "field_mismatch")
                .context(serde_json::json!({ "other": self.other })))
        }
    }

    fn rule_name(&self) -> &'static str {
        "equals_field"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "other": self.other }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::FormValues;
    use chrono::Utc;

    fn check(values: &FormValues) -> ValidationResult<()> {
        let value = values
            .get("confirmPassword")
            .cloned()
            .unwrap_or_else(|| FieldValue::text(""));
        FieldMatchValidator::new("password").validate(
            "confirmPassword",
            &value,
            &RuleContext::new(values, Utc::now()),
        )
    }

    #[test]
    fn test_matching_values_pass() {
        let values = FormValues::new()
            .with("password", "Abcdefg1")
            .with("confirmPassword", "Abcdefg1");
        assert!(check(&values).is_ok());
    }

    #[test]
    fn test_mismatch_reports_other_field() {
        let values = FormValues::new()
            .with("password", "Abcdefg1")
            .with("confirmPassword", "Abcdefg2");
        let error = check(&values).unwrap_err();
        assert_eq!(error.code, "field_mismatch");
        assert_eq!(error.context, Some(serde_json::json!({"other": "password"})));
    }

    #[test]
    fn test_reads_other_field_fresh() {
        let mut values = FormValues::new()
            .with("password", "Abcdefg1")
            .with("confirmPassword", "Abcdefg1");
        assert!(check(&values).is_ok());

        values.set("password", "Changed99");
        assert!(check(&values).is_err());
    }

    #[test]
    fn test_missing_other_field_is_mismatch() {
        let values = FormValues::new().with("confirmPassword", "Abcdefg1");
        assert!(check(&values).is_err());
    }

    #[test]
    fn test_empty_value_is_left_to_required() {
        let values = FormValues::new().with("password", "Abcdefg1");
        assert!(check(&values).is_ok());
    }
}
