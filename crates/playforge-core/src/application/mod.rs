//! Application layer for Playforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (PlaybookService, PlaybookRunner, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! playbook rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    OutputWriter, PlaybookRunner, PlaybookService, RenderService, RenderedOutput, RunReport,
    WriteAction, WritePolicy, WrittenOutput,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ErrorReporter, Filesystem, PlaybookLoader, Prompter, TemplateEngine};

pub use error::{ApplicationError, LoadError, PromptError, RenderError, WriteError};
