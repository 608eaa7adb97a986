//! Field values and the form value map they live in

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic value of one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    /// Calendar date as typed by the user, e.g. `2001-04-17`
    Date(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn date(value: impl Into<String>) -> Self {
        FieldValue::Date(value.into())
    }

    /// String content of text and date values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => Some(s),
            FieldValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Empty text or date strings are empty; booleans never are
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => s.is_empty(),
            FieldValue::Bool(_) => false,
        }
    }

    /// Comparison used by equality checks: dates and text compare by content
    pub fn same_content(&self, other: &FieldValue) -> bool {
        match (self.as_str(), other.as_str()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => write!(f, "{}", s),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Kind of input a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Boolean,
    Date,
}

impl FieldKind {
    /// Value a field of this kind holds after a reset
    pub fn empty_value(&self) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Boolean => FieldValue::Bool(false),
            FieldKind::Date => FieldValue::Date(String::new()),
        }
    }

    /// Bring an incoming value into this kind's representation.
    ///
    /// Text typed into a date input becomes a date value. Anything else is
    /// kept as-is and left for the field's checks to judge.
    pub fn coerce(&self, value: FieldValue) -> FieldValue {
        match (self, value) {
            (FieldKind::Date, FieldValue::Text(s)) => FieldValue::Date(s),
            (_, value) => value,
        }
    }
}

/// Current value of every field of one form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: BTreeMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Builder-style variant of [`FormValues::set`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// String content of a field, empty when missing or boolean
    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(FieldValue::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(FieldValue::text("").is_empty());
        assert!(FieldValue::date("").is_empty());
        assert!(!FieldValue::text(" ").is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
    }

    #[test]
    fn test_kind_defaults_and_coercion() {
        assert_eq!(FieldKind::Text.empty_value(), FieldValue::text(""));
        assert_eq!(FieldKind::Boolean.empty_value(), FieldValue::Bool(false));
        assert_eq!(
            FieldKind::Date.coerce(FieldValue::text("2000-01-01")),
            FieldValue::date("2000-01-01")
        );
        assert_eq!(FieldKind::Text.coerce(true.into()), FieldValue::Bool(true));
    }

    #[test]
    fn test_same_content_ignores_text_date_tag() {
        assert!(FieldValue::text("2000-01-01").same_content(&FieldValue::date("2000-01-01")));
        assert!(!FieldValue::text("true").same_content(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_form_values_json_shape() {
        let values = FormValues::new()
            .with("firstName", "Olena")
            .with("terms", true);

        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json, serde_json::json!({"firstName": "Olena", "terms": true}));

        let back: FormValues = serde_json::from_value(json).unwrap();
        assert_eq!(back.text("firstName"), "Olena");
        assert_eq!(back.get("terms").and_then(FieldValue::as_bool), Some(true));
        assert_eq!(back.text("missing"), "");
    }
}
