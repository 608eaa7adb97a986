//! Tagged check variants with uniform dispatch

use crate::error::ValidationResult;
use crate::traits::{RuleContext, ValidationRule};
use crate::validators::*;
use crate::values::FieldValue;
use serde_json::Value;

/// One entry of a field's rule: which kind of check, with its configuration
#[derive(Debug, Clone)]
pub enum Check {
    Required(RequiredValidator),
    Length(LengthValidator),
    Pattern(PatternValidator),
    Email(EmailValidator),
    EqualsField(FieldMatchValidator),
    DateNotFuture(DateValidator),
    EqualsLiteral(LiteralValidator),
    Custom(CustomValidator),
}

impl Check {
    fn rule(&self) -> &dyn ValidationRule {
        match self {
            Check::Required(v) => v,
            Check::Length(v) => v,
            Check::Pattern(v) => v,
            Check::Email(v) => v,
            Check::EqualsField(v) => v,
            Check::DateNotFuture(v) => v,
            Check::EqualsLiteral(v) => v,
            Check::Custom(v) => v,
        }
    }

    /// Field this check reads besides its own, if any
    pub fn referenced_field(&self) -> Option<&str> {
        match self {
            Check::EqualsField(v) => Some(&v.other),
            _ => None,
        }
    }

    /// Whether the check's outcome depends on the evaluation instant
    pub fn is_time_dependent(&self) -> bool {
        matches!(self, Check::DateNotFuture(_))
    }
}

impl ValidationRule for Check {
    fn validate(
        &self,
        field: &str,
        value: &FieldValue,
        ctx: &RuleContext<'_>,
    ) -> ValidationResult<()> {
        self.rule().validate(field, value, ctx)
    }

    fn rule_name(&self) -> &'static str {
        self.rule().rule_name()
    }

    fn parameters(&self) -> Option<Value> {
        self.rule().parameters()
    }
}

macro_rules! impl_from_validator {
    ($($validator:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$validator> for Check {
                fn from(validator: $validator) -> Self {
                    Check::$variant(validator)
                }
            }
        )*
    };
}

impl_from_validator! {
    RequiredValidator => Required,
    LengthValidator => Length,
    PatternValidator => Pattern,
    EmailValidator => Email,
    FieldMatchValidator => EqualsField,
    DateValidator => DateNotFuture,
    LiteralValidator => EqualsLiteral,
    CustomValidator => Custom,
}
