//! Core validation traits and the evaluation context

use crate::error::ValidationResult;
use crate::values::{FieldValue, FormValues};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Everything a check may look at besides its own field's value.
///
/// Cross-field checks read other fields through [`RuleContext::resolve`],
/// which always returns the value present at evaluation time. Only raw
/// values are exposed, never another field's validation outcome, so no
/// evaluation order between fields can matter.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    values: &'a FormValues,
    now: DateTime<Utc>,
}

impl<'a> RuleContext<'a> {
    pub fn new(values: &'a FormValues, now: DateTime<Utc>) -> Self {
        Self { values, now }
    }

    /// Current value of another field
    pub fn resolve(&self, field: &str) -> Option<&'a FieldValue> {
        self.values.get(field)
    }

    /// The full value snapshot under evaluation
    pub fn values(&self) -> &'a FormValues {
        self.values
    }

    /// Instant the evaluation is pinned to
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Core validation trait that all validators must implement
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    fn validate(&self, field: &str, value: &FieldValue, ctx: &RuleContext<'_>)
        -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}
