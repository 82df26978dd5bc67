//! Domain value objects: InputType, ValidationRule, UrlPattern, AnswerValue, AnswerMap.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Rule
//! names arrive as free text from playbook documents; the `FromStr` parsers
//! here are the single place where that text becomes a typed value, and they
//! report unknown names with the domain error the caller expects.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::error::InputValidationError;

// ── InputType ────────────────────────────────────────────────────────────────

/// How a question is presented to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputType {
    /// Pick one of `validValues`.
    Select,
    /// Free text.
    Textfield,
    /// Missing (empty) or unrecognised value, kept verbatim so the playbook
    /// validator can report it.
    Unspecified(String),
}

impl InputType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Select => "select",
            Self::Textfield => "textfield",
            Self::Unspecified(raw) => raw,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select)
    }
}

impl From<&str> for InputType {
    fn from(s: &str) -> Self {
        match s.trim() {
            "select" => Self::Select,
            "textfield" => Self::Textfield,
            other => Self::Unspecified(other.to_string()),
        }
    }
}

impl Default for InputType {
    fn default() -> Self {
        Self::Unspecified(String::new())
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ValidationRule ───────────────────────────────────────────────────────────

/// Built-in answer validation rules, selected by `validation:` in a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    DomainName,
    IpAddress,
    Email,
    Url,
    IntegerRange,
}

impl ValidationRule {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DomainName => "domain_name",
            Self::IpAddress => "ip_address",
            Self::Email => "email",
            Self::Url => "url",
            Self::IntegerRange => "integer_range",
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationRule {
    type Err = InputValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domain_name" => Ok(Self::DomainName),
            "ip_address" => Ok(Self::IpAddress),
            "email" => Ok(Self::Email),
            "url" => Ok(Self::Url),
            "integer_range" => Ok(Self::IntegerRange),
            other => Err(InputValidationError::UnknownValidationRule {
                name: other.to_string(),
            }),
        }
    }
}

// ── UrlPattern ───────────────────────────────────────────────────────────────

/// One entry of `validPatterns` for `validation: url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlPattern {
    Any,
    Http,
    Https,
}

impl UrlPattern {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl FromStr for UrlPattern {
    type Err = InputValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(InputValidationError::InvalidValidPattern {
                pattern: s.to_string(),
            }),
        }
    }
}

// ── AnswerValue ──────────────────────────────────────────────────────────────

/// A collected answer, typed at the moment it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl AnswerValue {
    /// Convert a raw answer according to the question's `variableType` tag.
    ///
    /// `int`/`integer`/`number` become [`AnswerValue::Integer`] and
    /// `bool`/`boolean` become [`AnswerValue::Boolean`] only when the text is
    /// already in canonical form (`80`, `-5`, `true`, `false`). Anything else,
    /// such as `0080`, `+5` or `yes`, stays text so conditions and templates
    /// see exactly what the operator typed.
    pub fn from_raw(raw: &str, variable_type: &str) -> Self {
        let typed = match variable_type.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" | "number" => raw.parse::<i64>().ok().map(Self::Integer),
            "bool" | "boolean" => raw.parse::<bool>().ok().map(Self::Boolean),
            _ => None,
        };

        typed
            .filter(|value| value.to_string() == raw)
            .unwrap_or_else(|| Self::Text(raw.to_string()))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl Serialize for AnswerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

// ── AnswerMap ────────────────────────────────────────────────────────────────

/// Answers collected during one run, in question order.
///
/// Inserting an existing key replaces its value in place and keeps the
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    entries: Vec<(String, AnswerValue)>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AnswerMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerMap
where
    K: Into<String>,
    V: Into<AnswerValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_type_parses_known_values() {
        assert_eq!(InputType::from("select"), InputType::Select);
        assert_eq!(InputType::from("textfield"), InputType::Textfield);
        assert_eq!(
            InputType::from("checkbox"),
            InputType::Unspecified("checkbox".into())
        );
        assert_eq!(InputType::default().as_str(), "");
    }

    #[test]
    fn validation_rule_rejects_unknown_names() {
        assert_eq!(
            "integer_range".parse::<ValidationRule>().unwrap(),
            ValidationRule::IntegerRange
        );
        assert!(matches!(
            "not_included".parse::<ValidationRule>(),
            Err(InputValidationError::UnknownValidationRule { .. })
        ));
    }

    #[test]
    fn url_pattern_is_case_insensitive() {
        assert_eq!("HTTPS".parse::<UrlPattern>().unwrap(), UrlPattern::Https);
        assert!(matches!(
            "ftp".parse::<UrlPattern>(),
            Err(InputValidationError::InvalidValidPattern { .. })
        ));
    }

    #[test]
    fn answer_value_typing_follows_variable_type() {
        assert_eq!(AnswerValue::from_raw("3600", "int"), AnswerValue::Integer(3600));
        assert_eq!(
            AnswerValue::from_raw("3600", "string"),
            AnswerValue::Text("3600".into())
        );
        assert_eq!(AnswerValue::from_raw("true", "bool"), AnswerValue::Boolean(true));
        assert_eq!(AnswerValue::from_raw("-5", "number"), AnswerValue::Integer(-5));
        // unparseable input keeps its text form
        assert_eq!(
            AnswerValue::from_raw("soon", "integer"),
            AnswerValue::Text("soon".into())
        );
    }

    #[test]
    fn non_canonical_answers_keep_their_text() {
        for (raw, variable_type) in [
            ("yes", "bool"),
            ("n", "boolean"),
            ("True", "bool"),
            ("0080", "int"),
            ("+5", "integer"),
            (" 42", "number"),
        ] {
            let value = AnswerValue::from_raw(raw, variable_type);
            assert_eq!(value, AnswerValue::Text(raw.into()), "{raw} as {variable_type}");
            assert_eq!(value.to_string(), raw);
        }
    }

    #[test]
    fn answer_map_keeps_insertion_order() {
        let mut answers = AnswerMap::new();
        answers.insert("b", "2");
        answers.insert("a", "1");
        answers.insert("b", "3");

        let keys: Vec<_> = answers.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(answers.get("b"), Some(&AnswerValue::Text("3".into())));
        assert_eq!(answers.len(), 2);
    }
}
