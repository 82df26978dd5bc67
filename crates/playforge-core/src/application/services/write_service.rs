//! Output Writer - persist rendered content, resolving conflicts with
//! existing files.
//!
//! | file exists | overwrite | append | action                       |
//! |-------------|-----------|--------|------------------------------|
//! | no          | any       | any    | create parents, write        |
//! | yes         | true      | false  | overwrite                    |
//! | yes         | false     | true   | append                       |
//! | yes         | equal     | equal  | ask; yes overwrites, no fails |

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, WriteError,
        ports::{Filesystem, Prompter},
    },
    error::PlayforgeResult,
};

/// How to treat an output file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WritePolicy {
    pub overwrite: bool,
    pub append: bool,
}

impl WritePolicy {
    pub const fn new(overwrite: bool, append: bool) -> Self {
        Self { overwrite, append }
    }

    pub const fn overwrite() -> Self {
        Self::new(true, false)
    }

    pub const fn append() -> Self {
        Self::new(false, true)
    }
}

/// What happened to an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Created,
    Overwritten,
    Appended,
}

impl WriteAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Overwritten => "overwritten",
            Self::Appended => "appended",
        }
    }
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct OutputWriter {
    filesystem: Arc<dyn Filesystem>,
    prompter: Arc<dyn Prompter>,
}

impl OutputWriter {
    pub fn new(filesystem: Arc<dyn Filesystem>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            filesystem,
            prompter,
        }
    }

    #[instrument(skip_all, fields(path = %path.display(), overwrite = policy.overwrite, append = policy.append))]
    pub fn write(
        &self,
        path: &Path,
        content: &str,
        policy: WritePolicy,
    ) -> PlayforgeResult<WriteAction> {
        if !self.filesystem.exists(path) {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(path, content)?;
            info!("Output created");
            return Ok(WriteAction::Created);
        }

        let action = match (policy.overwrite, policy.append) {
            (true, false) => WriteAction::Overwritten,
            (false, true) => WriteAction::Appended,
            _ => {
                let message = format!(
                    "The output file {} already exists. Do you want to overwrite it?",
                    path.display()
                );
                if !self.prompter.confirm(&message)? {
                    debug!("Overwrite declined");
                    return Err(ApplicationError::from(WriteError::Declined {
                        path: path.to_path_buf(),
                    })
                    .into());
                }
                WriteAction::Overwritten
            }
        };

        match action {
            WriteAction::Appended => self.filesystem.append_file(path, content)?,
            _ => self.filesystem.write_file(path, content)?,
        }

        info!(action = %action, "Output written");
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use mockall::predicate::eq;

    use crate::application::ports::MockFilesystem;
    use crate::domain::{InputValidationError, Question};
    use crate::error::PlayforgeError;

    /// Answers every confirmation with the same decision and counts the calls.
    struct FixedConfirm {
        answer: bool,
        asked: Mutex<usize>,
    }

    impl FixedConfirm {
        fn new(answer: bool) -> Arc<Self> {
            Arc::new(Self {
                answer,
                asked: Mutex::new(0),
            })
        }

        fn asked(&self) -> usize {
            *self.asked.lock().unwrap()
        }
    }

    impl Prompter for FixedConfirm {
        fn select(&self, _label: &str, _items: &[String]) -> PlayforgeResult<String> {
            unreachable!("writer never selects")
        }

        fn text(&self, _: &str, _: Option<&str>, _: Option<&str>) -> PlayforgeResult<String> {
            unreachable!("writer never asks for text")
        }

        fn confirm(&self, message: &str) -> PlayforgeResult<bool> {
            assert!(message.contains("already exists"));
            *self.asked.lock().unwrap() += 1;
            Ok(self.answer)
        }

        fn report_invalid(&self, _question: &Question, _error: &InputValidationError) {}
    }

    fn existing(fs: &mut MockFilesystem, path: &'static str) {
        fs.expect_exists()
            .with(eq(Path::new(path)))
            .return_const(true);
    }

    #[test]
    fn missing_file_creates_parents_then_writes() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .with(eq(Path::new("out/terraform")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| path == Path::new("out/terraform/a.tf") && content == "body")
            .times(1)
            .returning(|_, _| Ok(()));

        let prompter = FixedConfirm::new(false);
        let writer = OutputWriter::new(Arc::new(fs), prompter.clone());

        let action = writer
            .write(Path::new("out/terraform/a.tf"), "body", WritePolicy::default())
            .unwrap();
        assert_eq!(action, WriteAction::Created);
        assert_eq!(prompter.asked(), 0);
    }

    #[test]
    fn overwrite_flag_replaces_without_asking() {
        let mut fs = MockFilesystem::new();
        existing(&mut fs, "a.tf");
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));
        fs.expect_append_file().never();

        let prompter = FixedConfirm::new(false);
        let writer = OutputWriter::new(Arc::new(fs), prompter.clone());

        let action = writer
            .write(Path::new("a.tf"), "new", WritePolicy::overwrite())
            .unwrap();
        assert_eq!(action, WriteAction::Overwritten);
        assert_eq!(prompter.asked(), 0);
    }

    #[test]
    fn append_flag_appends_without_asking() {
        let mut fs = MockFilesystem::new();
        existing(&mut fs, "a.tf");
        fs.expect_append_file()
            .withf(|_, content| content == "more")
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file().never();

        let writer = OutputWriter::new(Arc::new(fs), FixedConfirm::new(false));
        let action = writer
            .write(Path::new("a.tf"), "more", WritePolicy::append())
            .unwrap();
        assert_eq!(action, WriteAction::Appended);
    }

    #[test]
    fn conflicting_flags_ask_the_operator() {
        for policy in [WritePolicy::new(false, false), WritePolicy::new(true, true)] {
            let mut fs = MockFilesystem::new();
            existing(&mut fs, "a.tf");
            fs.expect_write_file().times(1).returning(|_, _| Ok(()));

            let prompter = FixedConfirm::new(true);
            let writer = OutputWriter::new(Arc::new(fs), prompter.clone());

            let action = writer.write(Path::new("a.tf"), "new", policy).unwrap();
            assert_eq!(action, WriteAction::Overwritten);
            assert_eq!(prompter.asked(), 1);
        }
    }

    #[test]
    fn declining_leaves_the_file_alone() {
        let mut fs = MockFilesystem::new();
        existing(&mut fs, "a.tf");
        fs.expect_write_file().never();
        fs.expect_append_file().never();

        let writer = OutputWriter::new(Arc::new(fs), FixedConfirm::new(false));
        let err = writer
            .write(Path::new("a.tf"), "new", WritePolicy::default())
            .unwrap_err();

        assert!(matches!(
            err,
            PlayforgeError::Application(ApplicationError::Write(WriteError::Declined { .. }))
        ));
    }
}
