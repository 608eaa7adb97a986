//! Validation error types and handling

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Result of running a single check against a single field
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Individual validation error for a specific field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Additional context or hints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: "validation_failed".to_string(),
            context: None,
        }
    }

    /// Create a validation error with a specific code
    pub fn with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
            context: None,
        }
    }

    /// Set additional context
    pub fn context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of evaluating a whole form: at most one error per field.
///
/// A field without an entry is valid. A fresh value is produced by every
/// evaluation; callers replace their copy wholesale instead of patching it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ValidationErrors {
    /// Map of field names to the first failing check's error
    pub errors: BTreeMap<String, ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error for its field, replacing any earlier one
    pub fn insert(&mut self, error: ValidationError) {
        self.errors.insert(error.field.clone(), error);
    }

    /// Check if there are any validation errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of fields with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get the error for a specific field
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    /// Get the error message for a specific field
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|e| e.message.as_str())
    }

    /// Check if a specific field has an error
    pub fn has_field_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Names of the fields that failed, in field-name order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.errors.len())?;
            for (field, error) in &self.errors {
                write!(f, "\n  {}: {}", field, error.message)?;
            }
            Ok(())
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.insert(error);
        errors
    }
}

/// Problems detected while assembling a rule schema
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Field '{field}' is compared against undeclared field '{target}'")]
    UnknownFieldReference { field: String, target: String },

    #[error("Field '{0}' cannot be compared against itself")]
    SelfReference(String),

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
