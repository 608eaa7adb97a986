//! # formflow-validation
//!
//! Declarative rule engine for structured forms. Each field carries an
//! ordered list of checks; evaluating a value snapshot yields at most one
//! error per field, taken from the first failing check. Checks that look at
//! other fields read them from the snapshot passed into the evaluation.

pub mod check;
pub mod error;
pub mod messages;
pub mod registration;
pub mod rules;
pub mod traits;
pub mod validators;
pub mod values;

// Re-exports for easy access
pub use check::Check;
pub use error::{SchemaError, ValidationError, ValidationErrors, ValidationResult};
pub use messages::{Locale, MessageCatalog};
pub use registration::{fields, registration_rules};
pub use rules::{FieldRule, Rules, RulesBuilder};
pub use traits::{RuleContext, ValidationRule};
pub use values::{FieldKind, FieldValue, FormValues};

// Built-in validators
pub use validators::{
    CustomValidator, DateValidator, EmailValidator, FieldMatchValidator, LengthValidator,
    LiteralValidator, PatternValidator, RequiredValidator,
};
