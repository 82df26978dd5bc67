//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not playbook
//! rules. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running a playbook.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// The playbook document could not be read or parsed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("Playbook not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse playbook {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Collecting an answer failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PromptError {
    #[error("Prompt cancelled")]
    Cancelled,

    #[error("No answer available for '{label}'")]
    Exhausted { label: String },

    #[error("Prompt failed: {reason}")]
    Io { reason: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("Failed to read template {template}: {reason}")]
    TemplateRead { template: String, reason: String },

    #[error("Failed to parse template {template}: {reason}")]
    TemplateParse { template: String, reason: String },

    #[error("Failed to render template {template}: {reason}")]
    TemplateExec { template: String, reason: String },

    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WriteError {
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    #[error("Not overwriting existing file {path}")]
    Declined { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Load(LoadError::NotFound { path }) => vec![
                format!("Check the path: {}", path.display()),
                "Pass the playbook file itself, not its directory".into(),
            ],
            Self::Load(LoadError::Parse { .. }) => vec![
                "Check the playbook is valid YAML".into(),
                "Field names are camelCase, e.g. variableName, inputType".into(),
            ],
            Self::Load(LoadError::Read { .. }) => {
                vec!["Check that you have read permissions".into()]
            }
            Self::Prompt(_) => vec!["Run the command again from an interactive terminal".into()],
            Self::Render(RenderError::InvalidOutputPath { .. }) => vec![
                "outputFile must render to a relative, non-empty path".into(),
                "Check the answers referenced by outputFile".into(),
            ],
            Self::Render(_) => vec![
                "Check the template syntax".into(),
                "Use `is defined` for variables whose question may be skipped".into(),
            ],
            Self::Write(WriteError::Declined { .. }) => vec![
                "Overwrite the file, delete the file, or provide a new name".into(),
                "Use --overwrite or --append to skip the confirmation".into(),
            ],
            Self::Write(WriteError::Filesystem { path, .. }) => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Load(LoadError::NotFound { .. }) => ErrorCategory::NotFound,
            Self::Load(LoadError::Parse { .. }) => ErrorCategory::Validation,
            Self::Load(LoadError::Read { .. }) => ErrorCategory::Internal,
            Self::Prompt(PromptError::Io { .. }) => ErrorCategory::Internal,
            Self::Prompt(_) => ErrorCategory::Input,
            Self::Render(RenderError::TemplateRead { .. }) => ErrorCategory::NotFound,
            Self::Render(_) => ErrorCategory::Validation,
            Self::Write(WriteError::Declined { .. }) => ErrorCategory::Input,
            Self::Write(WriteError::Filesystem { .. }) => ErrorCategory::Internal,
        }
    }
}
