//! Playbook aggregate: the questions to ask and the outputs to render.
//!
//! A [`Playbook`] is built once by a loader and is read-only for the rest of
//! a run. Fields are public so adapters can map documents onto it directly;
//! the `with_*` helpers exist for building playbooks in code and tests.

use std::path::{Path, PathBuf};

use crate::domain::error::InputValidationError;
use crate::domain::value_objects::{InputType, UrlPattern};

// ── Playbook ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Playbook {
    pub name: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub outputs: Vec<Output>,
}

impl Playbook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Look up a question by the variable its answer is stored under.
    pub fn question(&self, variable_name: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|q| q.variable_name == variable_name)
    }
}

// ── Question ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Question {
    pub prompt: String,
    pub variable_name: String,
    pub input_type: InputType,
    pub variable_type: String,
    pub valid_values: Vec<String>,
    pub default: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    /// Name of a built-in rule; parsed when an answer is checked.
    pub validation: Option<String>,
    pub custom_regex_validation: Option<String>,
    /// Raw `validPatterns` entries, only meaningful with `validation: url`.
    pub valid_patterns: Vec<String>,
    pub range: Option<IntegerRange>,
    /// Three-token condition gating whether the question is asked.
    pub condition: Option<String>,
}

impl Question {
    /// A free-text question storing a string answer.
    pub fn text(prompt: impl Into<String>, variable_name: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            variable_name: variable_name.into(),
            input_type: InputType::Textfield,
            variable_type: "string".into(),
            ..Self::default()
        }
    }

    /// A select question offering `values` in order.
    pub fn select<I, S>(prompt: impl Into<String>, variable_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            variable_name: variable_name.into(),
            input_type: InputType::Select,
            variable_type: "string".into(),
            valid_values: values.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_variable_type(mut self, variable_type: impl Into<String>) -> Self {
        self.variable_type = variable_type.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_validation(mut self, rule: impl Into<String>) -> Self {
        self.validation = Some(rule.into());
        self
    }

    pub fn with_custom_regex(mut self, pattern: impl Into<String>) -> Self {
        self.custom_regex_validation = Some(pattern.into());
        self
    }

    pub fn with_valid_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.range = Some(IntegerRange::new(min, max));
        self
    }

    pub fn with_condition(mut self, expression: impl Into<String>) -> Self {
        self.condition = Some(expression.into());
        self
    }

    /// Parse `valid_patterns` into typed patterns, failing on the first unknown entry.
    pub fn url_patterns(&self) -> Result<Vec<UrlPattern>, InputValidationError> {
        self.valid_patterns.iter().map(|p| p.parse()).collect()
    }
}

// ── IntegerRange ─────────────────────────────────────────────────────────────

/// Inclusive bounds for `integer_range`. Either bound may be missing in a
/// document; that only becomes an error when the rule is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegerRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl IntegerRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Both bounds, if both are set.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        Some((self.min?, self.max?))
    }
}

// ── Output ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Output {
    /// Template path relative to the playbook's directory.
    pub template_file: String,
    /// Template string for the destination path.
    pub output_file: String,
}

impl Output {
    pub fn new(template_file: impl Into<String>, output_file: impl Into<String>) -> Self {
        Self {
            template_file: template_file.into(),
            output_file: output_file.into(),
        }
    }

    pub fn template_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.template_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_fill_required_fields() {
        let q = Question::select("Record type?", "record_type", ["A", "CNAME"]);
        assert_eq!(q.input_type, InputType::Select);
        assert_eq!(q.variable_type, "string");
        assert_eq!(q.valid_values, vec!["A", "CNAME"]);

        let playbook = Playbook::new("zone")
            .with_question(q)
            .with_output(Output::new("zone.tpl", "out.tf"));
        assert!(playbook.question("record_type").is_some());
        assert!(playbook.question("missing").is_none());
    }

    #[test]
    fn range_bounds_need_both_ends() {
        assert_eq!(IntegerRange::new(0, 3600).bounds(), Some((0, 3600)));
        let half = IntegerRange {
            min: Some(1),
            max: None,
        };
        assert_eq!(half.bounds(), None);
    }

    #[test]
    fn template_path_is_joined_to_base_dir() {
        let out = Output::new("templates/zone.tpl", "x");
        assert_eq!(
            out.template_path(Path::new("/play")),
            PathBuf::from("/play/templates/zone.tpl")
        );
    }
}
