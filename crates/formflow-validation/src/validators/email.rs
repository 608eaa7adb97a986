//! Email format validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{RuleContext, ValidationRule};
use crate::values::FieldValue;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

// Browser `type=email` grammar: permissive local part, dot-separated hostname labels
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();

/// Validator for email address format
#[derive(Debug, Clone, Default)]
pub struct EmailValidator {
    pub message: Option<String>,
    /// Domain must end in a dot and at least two letters
    pub require_tld: bool,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self {
            message: None,
            require_tld: false,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Require top-level domain (e.g., .com, .org)
    pub fn require_tld(mut self, require: bool) -> Self {
        self.require_tld = require;
        self
    }

    fn pattern() -> Option<&'static Regex> {
        EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
    }

    fn is_valid_email(&self, email: &str) -> bool {
        let Some((local_part, domain_part)) = email.split_once('@') else {
            return false;
        };

        // RFC 5321 limits
        if local_part.len() > 64 || domain_part.len() > 255 {
            return false;
        }

        if !Self::pattern().map_or(false, |regex| regex.is_match(email)) {
            return false;
        }

        if self.require_tld {
            return match domain_part.rsplit_once('.') {
                Some((_, tld)) => tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
                None => false,
            };
        }

        true
    }
}

impl ValidationRule for EmailValidator {
    fn validate(
        &self,
        field: &str,
        value: &FieldValue,
        _ctx: &RuleContext<'_>,
    ) -> ValidationResult<()> {
        if value.is_empty() {
            return Ok(());
        }

        let email = match value.as_str() {
            Some(email) => email,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be text for email validation", field),
                    "invalid_type",
                ));
            }
        };

        if !self.is_valid_email(email) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} must be a valid email address", field));

            return Err(ValidationError::with_code(field, message, "invalid_email"));
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }
        params.insert("require_tld".to_string(), Value::Bool(self.require_tld));

        Some(Value::Object(params))
    }
}
