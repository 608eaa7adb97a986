//! Calendar date validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{RuleContext, ValidationRule};
use crate::values::FieldValue;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Validator requiring a date that does not lie after the evaluation instant.
///
/// Accepts `YYYY-MM-DD` (read as midnight UTC, so today is always valid)
/// and RFC 3339 timestamps.
#[derive(Debug, Clone, Default)]
pub struct DateValidator {
    /// Message used for dates after the evaluation instant
    pub future_message: Option<String>,
    /// Message used for values that are not dates at all
    pub invalid_message: Option<String>,
}

impl DateValidator {
    pub fn not_in_future() -> Self {
        Self::default()
    }

    pub fn future_message(mut self, message: impl Into<String>) -> Self {
        self.future_message = Some(message.into());
        self
    }

    pub fn invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = Some(message.into());
        self
    }

    /// Parse a user-supplied date into the instant it denotes
    pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();

        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }

        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl ValidationRule for DateValidator {
    fn validate(
        &self,
        field: &str,
        value: &FieldValue,
        ctx: &RuleContext<'_>,
    ) -> ValidationResult<()> {
        if value.is_empty() {
            return Ok(());
        }

        let instant = value.as_str().and_then(Self::parse_instant);

        match instant {
            None => {
                let message = self
                    .invalid_message
                    .clone()
                    .unwrap_or_else(|| format!("{} must be a valid date", field));
                Err(ValidationError::with_code(field, message, "invalid_date"))
            }
            Some(instant) if instant > ctx.now() => {
                let message = self
                    .future_message
                    .clone()
                    .unwrap_or_else(|| format!("{} cannot be in the future", field));
                Err(ValidationError::with_code(field, message, "date_in_future"))
            }
            Some(_) => Ok(()),
        }
    }

    fn rule_name(&self) -> &'static str {
        "date_not_future"
    }

    fn parameters(&self) -> Option<Value> {
        self.future_message
            .as_ref()
            .map(|msg| serde_json::json!({ "message": msg }))
    }
}
