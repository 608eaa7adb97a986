//! Custom predicate validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{RuleContext, ValidationRule};
use crate::values::{FieldValue, FormValues};
use serde_json::Value;
use std::sync::Arc;

/// Pure predicate over a field value and the full value snapshot
pub type Predicate = Arc<dyn Fn(&FieldValue, &FormValues) -> bool + Send + Sync>;

/// Custom validator wrapping a user-defined predicate
#[derive(Clone)]
pub struct CustomValidator {
    /// Name/identifier for this custom validator
    pub name: String,
    predicate: Predicate,
    /// Error message reported when the predicate returns false
    pub message: String,
}

impl CustomValidator {
    /// Create a new custom validator.
    ///
    /// The predicate runs for every value, empty ones included, and must
    /// not depend on anything but its arguments.
    pub fn new<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldValue, &FormValues) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// Get the validator name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for CustomValidator {
    fn validate(
        &self,
        field: &str,
        value: &FieldValue,
        ctx: &RuleContext<'_>,
    ) -> ValidationResult<()> {
        if (self.predicate)(value, ctx.values()) {
            Ok(())
        } else {
            Err(ValidationError::with_code(field, self.message.clone(), "custom")
                .context(serde_json::json!({ "rule": self.name })))
        }
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "name": self.name,
            "message": self.message,
        }))
    }
}
