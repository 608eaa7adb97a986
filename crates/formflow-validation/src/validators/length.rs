//! Length-based validator for text fields

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{RuleContext, ValidationRule};
use crate::values::FieldValue;
use serde_json::Value;

/// Validator for string length constraints
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Message used when the value is shorter than `min`
    pub too_short_message: Option<String>,
    /// Message used when the value is longer than `max`
    pub too_long_message: Option<String>,
}

impl LengthValidator {
    /// Create a new length validator with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum length constraint
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum length constraint
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set length range (min and max)
    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn too_short_message(mut self, message: impl Into<String>) -> Self {
        self.too_short_message = Some(message.into());
        self
    }

    pub fn too_long_message(mut self, message: impl Into<String>) -> Self {
        self.too_long_message = Some(message.into());
        self
    }
}

impl ValidationRule for LengthValidator {
    fn validate(
        &self,
        field: &str,
        value: &FieldValue,
        _ctx: &RuleContext<'_>,
    ) -> ValidationResult<()> {
        // Emptiness is reported by RequiredValidator
        if value.is_empty() {
            return Ok(());
        }

        let length = match value.as_str() {
            Some(s) => s.chars().count(),
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be text for length validation", field),
                    "invalid_type",
                ));
            }
        };

        if let Some(min) = self.min {
            if length < min {
                let message = self.too_short_message.clone().unwrap_or_else(|| {
                    format!("{} must be at least {} characters long", field, min)
                });
                return Err(ValidationError::with_code(field, message, "length_min"));
            }
        }

        if let Some(max) = self.max {
            if length > max {
                let message = self.too_long_message.clone().unwrap_or_else(|| {
                    format!("{} must be at most {} characters long", field, max)
                });
                return Err(ValidationError::with_code(field, message, "length_max"));
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}
