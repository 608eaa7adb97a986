//! Field rules, the rule schema and its builder

use crate::check::Check;
use crate::error::{SchemaError, ValidationError, ValidationErrors};
use crate::traits::{RuleContext, ValidationRule};
use crate::validators::*;
use crate::values::{FieldKind, FieldValue, FormValues};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;

/// Ordered checks for one field; the first failing check decides the error
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: String,
    kind: FieldKind,
    checks: Vec<Check>,
}

impl FieldRule {
    pub fn new(field: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            field: field.into(),
            kind,
            checks: Vec::new(),
        }
    }

    pub fn text(field: impl Into<String>) -> Self {
        Self::new(field, FieldKind::Text)
    }

    pub fn boolean(field: impl Into<String>) -> Self {
        Self::new(field, FieldKind::Boolean)
    }

    pub fn date(field: impl Into<String>) -> Self {
        Self::new(field, FieldKind::Date)
    }

    /// Append a check; checks run in the order they were added
    pub fn check(mut self, check: impl Into<Check>) -> Self {
        self.checks.push(check.into());
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Run the checks in order and return the first failure
    pub fn evaluate(&self, value: &FieldValue, ctx: &RuleContext<'_>) -> Option<ValidationError> {
        self.checks
            .iter()
            .find_map(|check| check.validate(&self.field, value, ctx).err())
    }
}

/// Immutable rule schema for one form
#[derive(Debug, Clone, Default)]
pub struct Rules {
    fields: Vec<FieldRule>,
}

impl Rules {
    /// Evaluate every declared field against a value snapshot.
    ///
    /// Missing fields are evaluated as their kind's empty value. The result
    /// depends only on `values` and `now`.
    pub fn evaluate(&self, values: &FormValues, now: DateTime<Utc>) -> ValidationErrors {
        let ctx = RuleContext::new(values, now);
        let mut errors = ValidationErrors::new();

        for rule in &self.fields {
            if let Some(error) = self.evaluate_rule(rule, values, &ctx) {
                errors.insert(error);
            }
        }

        tracing::trace!(
            fields = self.fields.len(),
            invalid = errors.len(),
            "evaluated form rules"
        );

        errors
    }

    fn evaluate_rule(
        &self,
        rule: &FieldRule,
        values: &FormValues,
        ctx: &RuleContext<'_>,
    ) -> Option<ValidationError> {
        match values.get(&rule.field) {
            Some(value) => rule.evaluate(value, ctx),
            None => rule.evaluate(&rule.kind.empty_value(), ctx),
        }
    }

    /// Every declared field set to its kind's empty value
    pub fn initial_values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|rule| (rule.field.clone(), rule.kind.empty_value()))
            .collect()
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.field == field)
    }

    pub fn field_kind(&self, field: &str) -> Option<FieldKind> {
        self.get(field).map(FieldRule::kind)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Field rules in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldRule> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|rule| rule.field.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON description of the schema, e.g. for a client-side renderer
    pub fn describe(&self) -> Value {
        let fields: Vec<Value> = self
            .fields
            .iter()
            .map(|rule| {
                let checks: Vec<Value> = rule
                    .checks
                    .iter()
                    .map(|check| {
                        serde_json::json!({
                            "rule": check.rule_name(),
                            "parameters": check.parameters(),
                            "time_dependent": check.is_time_dependent(),
                        })
                    })
                    .collect();

                serde_json::json!({
                    "field": rule.field,
                    "kind": rule.kind,
                    "checks": checks,
                })
            })
            .collect();

        Value::Array(fields)
    }
}

/// Builder for assembling a [`Rules`] schema
#[derive(Debug, Default)]
pub struct RulesBuilder {
    fields: Vec<FieldRule>,
    error: Option<SchemaError>,
}

impl RulesBuilder {
    /// Create a new rules builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field with its full rule
    pub fn field(mut self, rule: FieldRule) -> Self {
        if self.error.is_none() && self.fields.iter().any(|r| r.field == rule.field) {
            self.error = Some(SchemaError::DuplicateField(rule.field.clone()));
        }
        self.fields.push(rule);
        self
    }

    /// Append a check to a field, declaring the field on first use
    pub fn check(mut self, field: &str, kind: FieldKind, check: impl Into<Check>) -> Self {
        let check = check.into();
        match self.fields.iter_mut().find(|r| r.field == field) {
            Some(rule) => rule.checks.push(check),
            None => self.fields.push(FieldRule::new(field, kind).check(check)),
        }
        self
    }

    /// Required text field with optional length bounds
    pub fn required_string(
        self,
        field: &str,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        let builder = self.check(field, FieldKind::Text, RequiredValidator::new());

        if min_length.is_none() && max_length.is_none() {
            return builder;
        }

        let mut length = LengthValidator::new();
        if let Some(min) = min_length {
            length = length.min(min);
        }
        if let Some(max) = max_length {
            length = length.max(max);
        }
        builder.check(field, FieldKind::Text, length)
    }

    /// Required field holding an email address
    pub fn required_email(self, field: &str) -> Self {
        self.check(field, FieldKind::Text, RequiredValidator::new())
            .check(field, FieldKind::Text, EmailValidator::new())
    }

    /// Required field whose whole value must match `pattern`
    pub fn required_pattern(mut self, field: &str, pattern: &str) -> Self {
        self = self.check(field, FieldKind::Text, RequiredValidator::new());
        match PatternValidator::new(pattern) {
            Ok(validator) => self.check(field, FieldKind::Text, validator),
            Err(error) => {
                self.error.get_or_insert(error);
                self
            }
        }
    }

    /// Field that must equal another field's current value
    pub fn matches_field(self, field: &str, other: &str) -> Self {
        self.check(field, FieldKind::Text, FieldMatchValidator::new(other))
    }

    /// Required date that may not lie after the evaluation instant
    pub fn required_past_date(self, field: &str) -> Self {
        self.check(field, FieldKind::Date, RequiredValidator::new())
            .check(field, FieldKind::Date, DateValidator::not_in_future())
    }

    /// Field that must hold exactly `expected`
    pub fn must_equal(self, field: &str, expected: impl Into<FieldValue>) -> Self {
        let expected = expected.into();
        let kind = match expected {
            FieldValue::Bool(_) => FieldKind::Boolean,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Text(_) => FieldKind::Text,
        };
        self.check(field, kind, LiteralValidator::new(expected))
    }

    /// Add a custom predicate to a text field
    pub fn custom(self, field: &str, validator: CustomValidator) -> Self {
        self.check(field, FieldKind::Text, validator)
    }

    /// Finish the schema, rejecting dangling or self-referencing checks
    pub fn build(self) -> Result<Rules, SchemaError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let declared: HashSet<&str> = self.fields.iter().map(|r| r.field.as_str()).collect();

        for rule in &self.fields {
            for target in rule.checks.iter().filter_map(Check::referenced_field) {
                if target == rule.field {
                    return Err(SchemaError::SelfReference(rule.field.clone()));
                }
                if !declared.contains(target) {
                    return Err(SchemaError::UnknownFieldReference {
                        field: rule.field.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }

        Ok(Rules {
            fields: self.fields,
        })
    }
}
