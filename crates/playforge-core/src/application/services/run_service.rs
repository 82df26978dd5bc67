//! Playbook Runner - the whole run from document to files.
//!
//! `Load → Validate → AskQuestions → RenderOutputs → Done`. Any failure
//! aborts the remaining steps; outputs already written stay on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::{ErrorReporter, Filesystem, PlaybookLoader, Prompter, TemplateEngine},
        services::{
            OutputWriter, PlaybookService, RenderService, WriteAction, WritePolicy,
            playbook_service::base_dir,
        },
    },
    domain::{
        AnswerMap, AnswerValue, Condition, DomainError, InputType, InputValidator, Playbook,
        Question,
    },
    error::PlayforgeResult,
};

/// One output written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub path: PathBuf,
    pub action: WriteAction,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub playbook: String,
    pub answers: AnswerMap,
    pub outputs: Vec<WrittenOutput>,
}

pub struct PlaybookRunner {
    playbooks: PlaybookService,
    renderer: RenderService,
    writer: OutputWriter,
    prompter: Arc<dyn Prompter>,
    reporter: Arc<dyn ErrorReporter>,
}

impl PlaybookRunner {
    pub fn new(
        loader: Arc<dyn PlaybookLoader>,
        engine: Arc<dyn TemplateEngine>,
        filesystem: Arc<dyn Filesystem>,
        prompter: Arc<dyn Prompter>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            playbooks: PlaybookService::new(loader, engine.clone()),
            renderer: RenderService::new(engine),
            writer: OutputWriter::new(filesystem, prompter.clone()),
            prompter,
            reporter,
        }
    }

    /// Run the playbook at `path`. Failures are reported before they are
    /// returned.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn run(&self, path: &Path, policy: WritePolicy) -> PlayforgeResult<RunReport> {
        self.try_run(path, policy).inspect_err(|e| {
            if !e.is_user_abort() {
                self.reporter.report(e);
            }
        })
    }

    fn try_run(&self, path: &Path, policy: WritePolicy) -> PlayforgeResult<RunReport> {
        let playbook = self.playbooks.load_and_validate(path)?;
        info!(playbook = %playbook.name, "Running playbook");

        let answers = self.ask_questions(&playbook)?;
        let outputs = self.write_outputs(&playbook, &base_dir(path), &answers, policy)?;

        info!(outputs = outputs.len(), "Playbook finished");
        Ok(RunReport {
            playbook: playbook.name,
            answers,
            outputs,
        })
    }

    /// Ask every question whose condition holds against the answers so far.
    pub fn ask_questions(&self, playbook: &Playbook) -> PlayforgeResult<AnswerMap> {
        let mut answers = AnswerMap::new();

        for question in &playbook.questions {
            if let Some(expression) = question.condition.as_deref() {
                let condition = Condition::parse(expression).map_err(DomainError::from)?;
                if !condition.evaluate(&answers) {
                    debug!(variable = %question.variable_name, condition = %condition, "Skipping question");
                    continue;
                }
            }

            let raw = self.ask(question)?;
            answers.insert(
                question.variable_name.clone(),
                AnswerValue::from_raw(&raw, &question.variable_type),
            );
        }

        Ok(answers)
    }

    /// Prompt until the answer passes the question's rule.
    fn ask(&self, question: &Question) -> PlayforgeResult<String> {
        loop {
            let raw = match question.input_type {
                InputType::Select => self
                    .prompter
                    .select(&question.prompt, &question.valid_values)?,
                _ => {
                    let raw = self.prompter.text(
                        &question.prompt,
                        question.default.as_deref(),
                        question.placeholder.as_deref(),
                    )?;
                    match question.default.as_deref() {
                        Some(default) if raw.is_empty() => default.to_string(),
                        _ => raw,
                    }
                }
            };

            match InputValidator::validate(&raw, question) {
                Ok(()) => return Ok(raw),
                Err(e) if e.is_recoverable() => {
                    warn!(variable = %question.variable_name, error = %e, "Answer rejected");
                    self.prompter.report_invalid(question, &e);
                }
                Err(e) => return Err(DomainError::from(e).into()),
            }
        }
    }

    fn write_outputs(
        &self,
        playbook: &Playbook,
        base_dir: &Path,
        answers: &AnswerMap,
        policy: WritePolicy,
    ) -> PlayforgeResult<Vec<WrittenOutput>> {
        let mut written = Vec::with_capacity(playbook.outputs.len());

        for output in &playbook.outputs {
            let rendered = self.renderer.render(base_dir, answers, output)?;
            let action = self
                .writer
                .write(&rendered.path, &rendered.content, policy)?;
            written.push(WrittenOutput {
                path: rendered.path,
                action,
            });
        }

        Ok(written)
    }
}
