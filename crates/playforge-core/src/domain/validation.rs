use crate::domain::{
    condition::Condition,
    entities::{IntegerRange, Output, Playbook, Question},
    error::{DomainError, InputValidationError, PlaybookViolation},
    input_validation::compile_custom_regex,
    value_objects::{InputType, ValidationRule},
};

/// Structural playbook checks.
///
/// Checks run in document order and stop at the first violation. Template
/// syntax is not checked here; that needs a template engine.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_playbook(playbook: &Playbook) -> Result<(), DomainError> {
        if playbook.name.trim().is_empty() {
            return Err(PlaybookViolation::MissingName.into());
        }

        if playbook.questions.is_empty() {
            return Err(PlaybookViolation::NoQuestions.into());
        }

        for (index, question) in playbook.questions.iter().enumerate() {
            Self::validate_question(index + 1, question)?;
        }

        if playbook.outputs.is_empty() {
            return Err(PlaybookViolation::NoOutputs.into());
        }

        for (index, output) in playbook.outputs.iter().enumerate() {
            Self::validate_output(index + 1, output)?;
        }

        Ok(())
    }

    pub fn validate_question(position: usize, question: &Question) -> Result<(), DomainError> {
        let has_custom = question
            .custom_regex_validation
            .as_deref()
            .is_some_and(|p| !p.is_empty());
        let validation = question.validation.as_deref().filter(|v| !v.is_empty());

        if has_custom && validation.is_some() {
            return Err(PlaybookViolation::ConflictingValidation { position }.into());
        }

        if !question.valid_patterns.is_empty() {
            if has_custom {
                return Err(PlaybookViolation::PatternsWithCustomRegex { position }.into());
            }
            if let Some(rule) = validation.filter(|v| *v != ValidationRule::Url.as_str()) {
                return Err(PlaybookViolation::PatternsRequireUrl {
                    position,
                    validation: rule.to_string(),
                }
                .into());
            }
        }

        if question.prompt.trim().is_empty() {
            return Err(PlaybookViolation::MissingPrompt { position }.into());
        }

        if question.variable_name.trim().is_empty() {
            return Err(PlaybookViolation::MissingVariableName { position }.into());
        }

        if let InputType::Unspecified(raw) = &question.input_type {
            return Err(if raw.is_empty() {
                PlaybookViolation::MissingInputType { position }
            } else {
                PlaybookViolation::UnsupportedInputType {
                    position,
                    input_type: raw.clone(),
                }
            }
            .into());
        }

        if question.variable_type.trim().is_empty() {
            return Err(PlaybookViolation::MissingVariableType { position }.into());
        }

        if question.input_type.is_select() && question.valid_values.is_empty() {
            return Err(PlaybookViolation::SelectWithoutValues {
                position,
                variable: question.variable_name.clone(),
            }
            .into());
        }

        if let Some(expression) = question.condition.as_deref() {
            Condition::parse(expression).map_err(|source| PlaybookViolation::InvalidCondition {
                position,
                expression: expression.to_string(),
                source,
            })?;
        }

        Self::validate_rule(question).map_err(|source| PlaybookViolation::InvalidRule {
            position,
            variable: question.variable_name.clone(),
            source,
        })?;

        Ok(())
    }

    /// Rule settings that would reject every answer: a pattern that does not
    /// compile, an unknown rule name, an unknown `validPatterns` entry or an
    /// `integer_range` without both bounds.
    fn validate_rule(question: &Question) -> Result<(), InputValidationError> {
        if let Some(pattern) = question
            .custom_regex_validation
            .as_deref()
            .filter(|p| !p.is_empty())
        {
            compile_custom_regex(pattern)?;
            return Ok(());
        }

        let Some(name) = question.validation.as_deref().filter(|v| !v.is_empty()) else {
            return Ok(());
        };

        match name.parse::<ValidationRule>()? {
            ValidationRule::Url => {
                question.url_patterns()?;
            }
            ValidationRule::IntegerRange => {
                question
                    .range
                    .as_ref()
                    .and_then(IntegerRange::bounds)
                    .ok_or(InputValidationError::MissingRange)?;
            }
            _ => {}
        }

        Ok(())
    }

    pub fn validate_output(position: usize, output: &Output) -> Result<(), DomainError> {
        if output.template_file.trim().is_empty() {
            return Err(PlaybookViolation::MissingTemplateFile { position }.into());
        }
        if output.output_file.trim().is_empty() {
            return Err(PlaybookViolation::MissingOutputFile { position }.into());
        }
        Ok(())
    }
}
