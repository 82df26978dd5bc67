//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what a playbook run needs from the outside world.
//! The `playforge-adapters` and `playforge-cli` crates provide implementations.

use std::path::Path;

use crate::domain::{AnswerMap, InputValidationError, Playbook, Question};
use crate::error::{PlayforgeError, PlayforgeResult};

/// Port for reading a playbook document.
///
/// Implemented by:
/// - `playforge_adapters::loader::YamlPlaybookLoader`
pub trait PlaybookLoader: Send + Sync {
    /// Parse the document at `path` into a playbook. No rule checks happen here.
    fn load(&self, path: &Path) -> PlayforgeResult<Playbook>;
}

/// Port for collecting answers from the operator.
///
/// Implemented by:
/// - `playforge_cli::prompt::TerminalPrompter` (interactive)
/// - `playforge_adapters::prompt::ScriptedPrompter` (pre-recorded answers)
pub trait Prompter: Send + Sync {
    /// Pick one of `items`.
    fn select(&self, label: &str, items: &[String]) -> PlayforgeResult<String>;

    /// Free text. An empty string means the operator just pressed enter.
    fn text(
        &self,
        label: &str,
        default: Option<&str>,
        placeholder: Option<&str>,
    ) -> PlayforgeResult<String>;

    /// Yes/no decision. Implementations keep asking until they get one.
    fn confirm(&self, message: &str) -> PlayforgeResult<bool>;

    /// Tell the operator why their answer was rejected before asking again.
    fn report_invalid(&self, question: &Question, error: &InputValidationError);
}

/// Port for template checking and rendering.
///
/// Implemented by:
/// - `playforge_adapters::renderer::JinjaEngine`
pub trait TemplateEngine: Send + Sync {
    /// Read and parse the template at `path` without rendering it.
    fn check(&self, path: &Path) -> PlayforgeResult<()>;

    /// Read the template at `path` and render it against `answers`.
    fn render_file(&self, path: &Path, answers: &AnswerMap) -> PlayforgeResult<String>;

    /// Render an inline template string. `name` shows up in error messages.
    fn render_str(&self, name: &str, source: &str, answers: &AnswerMap) -> PlayforgeResult<String>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `playforge_adapters::filesystem::LocalFilesystem` (production)
/// - `playforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PlayforgeResult<()>;

    /// Write content to a file, replacing what was there.
    fn write_file(&self, path: &Path, content: &str) -> PlayforgeResult<()>;

    /// Append content to a file, creating it if absent.
    fn append_file(&self, path: &Path, content: &str) -> PlayforgeResult<()>;

    fn read_to_string(&self, path: &Path) -> PlayforgeResult<String>;
}

/// Port for reporting run failures.
///
/// Reporting is fire-and-forget: implementations swallow their own errors.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &PlayforgeError);
}
