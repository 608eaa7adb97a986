//! Per-field state: current values, touched flags and error visibility

use crate::clock::Clock;
use crate::error::{FormError, FormResult};
use formflow_validation::{FieldValue, FormValues, Rules, ValidationError, ValidationErrors};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Everything the renderer needs about the fields at one moment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub values: FormValues,
    pub touched: BTreeSet<String>,
    pub errors: ValidationErrors,
    pub submit_attempted: bool,
}

/// Tracks values and touched flags and keeps the error map current.
///
/// Every edit re-evaluates the whole schema, so the error of a field that
/// depends on another one (password confirmation) follows edits to either.
pub struct FieldController {
    rules: Arc<Rules>,
    clock: Arc<dyn Clock>,
    values: FormValues,
    touched: BTreeSet<String>,
    submit_attempted: bool,
    errors: ValidationErrors,
}

impl FieldController {
    pub fn new(rules: Arc<Rules>, clock: Arc<dyn Clock>) -> Self {
        let values = rules.initial_values();
        let errors = rules.evaluate(&values, clock.now());
        Self {
            rules,
            clock,
            values,
            touched: BTreeSet::new(),
            submit_attempted: false,
            errors,
        }
    }

    pub fn on_change(&mut self, field: &str, value: impl Into<FieldValue>) -> FormResult<()> {
        let kind = self
            .rules
            .field_kind(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;

        let value = kind.coerce(value.into());
        trace!(field, value = %value, "field changed");
        self.values.set(field, value);
        self.revalidate();
        Ok(())
    }

    /// Mark a field touched; it stays touched until the next reset
    pub fn on_blur(&mut self, field: &str) -> FormResult<()> {
        if !self.rules.contains(field) {
            return Err(FormError::UnknownField(field.to_string()));
        }

        if self.touched.insert(field.to_string()) {
            debug!(field, "field touched");
        }
        Ok(())
    }

    /// Whether the renderer should show this field's error
    pub fn should_show_error(&self, field: &str) -> bool {
        self.errors.has_field_error(field) && (self.submit_attempted || self.is_touched(field))
    }

    /// Current error of a field, shown or not
    pub fn error(&self, field: &str) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    /// Error message the renderer should show, if any
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.should_show_error(field) {
            self.errors.message(field)
        } else {
            None
        }
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub fn mark_submit_attempted(&mut self) {
        self.submit_attempted = true;
    }

    /// Re-evaluate against the clock's current instant.
    ///
    /// Date checks depend on "now", so the submit guard calls this instead of
    /// trusting the map from the last edit.
    pub fn revalidate(&mut self) -> &ValidationErrors {
        self.errors = self.rules.evaluate(&self.values, self.clock.now());
        &self.errors
    }

    /// Back to the state of a freshly created controller
    pub fn reset(&mut self) {
        self.values = self.rules.initial_values();
        self.touched.clear();
        self.submit_attempted = false;
        self.revalidate();
        debug!("fields reset");
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
            touched: self.touched.clone(),
            errors: self.errors.clone(),
            submit_attempted: self.submit_attempted,
        }
    }
}
