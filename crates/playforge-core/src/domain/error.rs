// ============================================================================
// domain/error.rs - PLAYBOOK ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the runner reports and then propagates them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A playbook broke one of its structural invariants.
    #[error("Invalid playbook: {0}")]
    Playbook(#[from] PlaybookViolation),

    /// An `if` expression could not be parsed.
    #[error("Invalid condition: {0}")]
    Condition(#[from] ConditionError),

    /// An operator answer failed its validation rule.
    #[error("Invalid answer: {0}")]
    Input(#[from] InputValidationError),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Playbook(v) => v.suggestions(),
            Self::Condition(_) => vec![
                "Conditions take exactly three space separated parts".into(),
                "Example: if: \"record_type == CNAME\"".into(),
                "Supported operators: ==, !=, &&, ||".into(),
            ],
            Self::Input(e) => vec![format!("Provide a value that satisfies: {}", e.rule())],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Playbook(_) | Self::Condition(_) => ErrorCategory::Validation,
            Self::Input(_) => ErrorCategory::Input,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Input,
}

// ============================================================================
// Playbook invariants
// ============================================================================

/// The first invariant a playbook violates.
///
/// Questions and outputs are identified by their 1-based position because the
/// field that would normally name them may be the one that is missing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybookViolation {
    #[error("playbook must have a name")]
    MissingName,

    #[error("playbook must have at least one question")]
    NoQuestions,

    #[error(
        "question {position}: customRegexValidation and validation are both set, provide only one of them"
    )]
    ConflictingValidation { position: usize },

    #[error("question {position}: validPatterns is not allowed together with customRegexValidation")]
    PatternsWithCustomRegex { position: usize },

    #[error("question {position}: validPatterns is only allowed with validation=url (got '{validation}')")]
    PatternsRequireUrl { position: usize, validation: String },

    #[error("question {position}: no prompt provided, every question must have a prompt")]
    MissingPrompt { position: usize },

    #[error("question {position}: no variableName provided, every question must have a variable name")]
    MissingVariableName { position: usize },

    #[error("question {position}: no inputType provided, every question must have an input type")]
    MissingInputType { position: usize },

    #[error("question {position}: unsupported inputType '{input_type}' (expected select or textfield)")]
    UnsupportedInputType { position: usize, input_type: String },

    #[error("question {position}: no variableType provided, every question must have a variable type")]
    MissingVariableType { position: usize },

    #[error("question {position}: select question '{variable}' must have at least one valid value")]
    SelectWithoutValues { position: usize, variable: String },

    #[error("question {position}: invalid condition '{expression}': {source}")]
    InvalidCondition {
        position: usize,
        expression: String,
        #[source]
        source: ConditionError,
    },

    #[error("question {position}: validation for '{variable}' can never pass: {source}")]
    InvalidRule {
        position: usize,
        variable: String,
        #[source]
        source: InputValidationError,
    },

    #[error("playbook must have at least one output (template file and output file)")]
    NoOutputs,

    #[error("output {position}: no templateFile given, every output must have a template file")]
    MissingTemplateFile { position: usize },

    #[error("output {position}: no outputFile given, every output must have an output file")]
    MissingOutputFile { position: usize },

    #[error("output {position}: invalid template file '{template}': {reason}")]
    InvalidTemplate {
        position: usize,
        template: String,
        reason: String,
    },
}

impl PlaybookViolation {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingName => vec!["Add a top-level `name:` to the playbook".into()],
            Self::NoQuestions => vec!["Add at least one entry under `questions:`".into()],
            Self::NoOutputs => vec![
                "Add at least one entry under `outputs:`".into(),
                "Each output needs a templateFile and an outputFile".into(),
            ],
            Self::ConflictingValidation { .. } | Self::PatternsWithCustomRegex { .. } => vec![
                "Use either a built-in `validation` rule or `customRegexValidation`".into(),
            ],
            Self::PatternsRequireUrl { .. } => {
                vec!["Remove `validPatterns` or set `validation: url`".into()]
            }
            Self::SelectWithoutValues { .. } => {
                vec!["List the choices under `validValues:`".into()]
            }
            Self::UnsupportedInputType { .. } => {
                vec!["Use `inputType: select` or `inputType: textfield`".into()]
            }
            Self::InvalidRule { source, .. } => vec![
                format!("Fix the question's {} settings", source.rule()),
                "Known rules: domain_name, ip_address, email, url, integer_range".into(),
            ],
            Self::InvalidTemplate { template, .. } => vec![
                format!("Check that '{template}' exists next to the playbook"),
                "Check the template for unbalanced {{ }} or {% %} tags".into(),
            ],
            _ => vec!["See the playbook format reference for required fields".into()],
        }
    }
}

// ============================================================================
// Conditions
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConditionError {
    #[error(
        "the condition needs 3 space separated parts to be valid, got {tokens} in '{expression}' (e.g. \"record_type == CNAME\")"
    )]
    Malformed { expression: String, tokens: usize },

    #[error("unsupported operator '{operator}', the supported operators are ==, !=, ||, &&")]
    UnsupportedOperator { operator: String },
}

// ============================================================================
// Answer validation
// ============================================================================

/// Why an answer was rejected.
///
/// Every rule reports its own variant so a rejected answer is never confused
/// with a rule that did not apply.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputValidationError {
    #[error("empty input")]
    EmptyInput,

    #[error("'{value}' does not match pattern '{pattern}'")]
    PatternMismatch { value: String, pattern: String },

    #[error("custom pattern '{pattern}' is not a valid regex: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("'{value}' is not a valid domain name")]
    InvalidDomain { value: String },

    #[error("'{value}' is not a valid IP address")]
    InvalidIpAddress { value: String },

    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },

    #[error("'{value}' is not a valid URL: {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("URL scheme '{scheme}' is not allowed (expected {expected})")]
    SchemeNotAllowed { scheme: String, expected: String },

    #[error("unknown validPatterns entry '{pattern}' (expected any, http or https)")]
    InvalidValidPattern { pattern: String },

    #[error("'{value}' is not an integer")]
    NotAnInteger { value: String },

    #[error("{value} is outside the range {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("integer_range validation requires a range with both min and max")]
    MissingRange,

    #[error("unknown validation rule '{name}'")]
    UnknownValidationRule { name: String },
}

impl InputValidationError {
    /// Whether a different answer could pass. Errors in the rule itself
    /// (bad pattern, missing range, unknown rule) fail the same way for
    /// every answer; a validated playbook never produces them.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InvalidPattern { .. }
                | Self::InvalidValidPattern { .. }
                | Self::MissingRange
                | Self::UnknownValidationRule { .. }
        )
    }

    /// Short description of the rule that rejected the answer.
    pub fn rule(&self) -> &'static str {
        match self {
            Self::EmptyInput => "non-empty text",
            Self::PatternMismatch { .. } | Self::InvalidPattern { .. } => "custom pattern",
            Self::InvalidDomain { .. } => "domain name",
            Self::InvalidIpAddress { .. } => "IPv4 or IPv6 address",
            Self::InvalidEmail { .. } => "email address",
            Self::InvalidUrl { .. }
            | Self::SchemeNotAllowed { .. }
            | Self::InvalidValidPattern { .. } => "URL",
            Self::NotAnInteger { .. } | Self::OutOfRange { .. } | Self::MissingRange => {
                "integer range"
            }
            Self::UnknownValidationRule { .. } => "known validation rule",
        }
    }
}
