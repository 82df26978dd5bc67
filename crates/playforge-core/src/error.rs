//! Unified error handling for Playforge Core.
//!
//! Wraps domain and application errors in one type with user-actionable
//! suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Playforge Core operations.
#[derive(Debug, Error, Clone)]
pub enum PlayforgeError {
    /// Errors from the domain layer (playbook or answer rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (loading, prompting, rendering, writing).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PlayforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `playforge config path` to find the active config file".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Playforge".into(),
                "Please report it together with the playbook that triggered it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Input => ErrorCategory::Input,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// True when the operator chose to stop (cancelled a prompt or declined
    /// an overwrite) rather than something going wrong.
    pub fn is_user_abort(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::Prompt(crate::application::PromptError::Cancelled)
                    | ApplicationError::Write(crate::application::WriteError::Declined { .. })
            )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The playbook is malformed.
    Validation,
    /// An operator answer or decision stopped the run.
    Input,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PlayforgeResult<T> = Result<T, PlayforgeError>;
