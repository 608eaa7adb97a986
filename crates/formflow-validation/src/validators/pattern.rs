//! Pattern-based validators using regular expressions

use crate::error::{SchemaError, ValidationError, ValidationResult};
use crate::traits::{RuleContext, ValidationRule};
use crate::values::FieldValue;
use regex::Regex;
use serde_json::Value;

/// Validator for one or more regular expressions.
///
/// Every pattern must match for the value to pass. With `full_match` the
/// match has to cover the whole value; otherwise finding it anywhere is
/// enough, which is how "contains at least one ..." requirements are
/// expressed.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    patterns: Vec<Regex>,
    /// Custom error message
    pub message: Option<String>,
    /// Whether to match the entire string (default) or just find a match
    pub full_match: bool,
}

impl PatternValidator {
    /// Create a new full-match pattern validator
    pub fn new(pattern: &str) -> Result<Self, SchemaError> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    /// Validator that passes when every pattern occurs somewhere in the value
    pub fn contains_all(patterns: &[&str]) -> Result<Self, SchemaError> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            message: None,
            full_match: false,
        })
    }

    /// Create a validator from an existing Regex
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            patterns: vec![regex],
            message: None,
            full_match: true,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set whether to match the full string or just find a match
    pub fn full_match(mut self, full_match: bool) -> Self {
        self.full_match = full_match;
        self
    }

    /// The source of every pattern, in order
    pub fn pattern_strings(&self) -> Vec<&str> {
        self.patterns.iter().map(Regex::as_str).collect()
    }

    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().all(|pattern| {
            if self.full_match {
                pattern.find(text).map_or(false, |m| m.as_str() == text)
            } else {
                pattern.is_match(text)
            }
        })
    }
}

impl ValidationRule for PatternValidator {
    fn validate(
        &self,
        field: &str,
        value: &FieldValue,
        _ctx: &RuleContext<'_>,
    ) -> ValidationResult<()> {
        if value.is_empty() {
            return Ok(());
        }

        let text = match value.as_str() {
            Some(text) => text,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be text for pattern validation", field),
                    "invalid_type",
                ));
            }
        };

        if !self.matches(text) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} does not match the required pattern", field));

            return Err(ValidationError::with_code(field, message, "pattern_mismatch"));
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        params.insert(
            "patterns".to_string(),
            Value::from(self.pattern_strings()),
        );
        params.insert("full_match".to_string(), Value::Bool(self.full_match));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}
