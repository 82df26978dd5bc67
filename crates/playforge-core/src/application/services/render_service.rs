//! Render Service - expand one output's path and content.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, RenderError, ports::TemplateEngine},
    domain::{AnswerMap, Output},
    error::PlayforgeResult,
};

/// A rendered output, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub path: PathBuf,
    pub content: String,
}

pub struct RenderService {
    engine: Arc<dyn TemplateEngine>,
}

impl RenderService {
    pub fn new(engine: Arc<dyn TemplateEngine>) -> Self {
        Self { engine }
    }

    /// Expand `output.output_file` into a path under `base_dir`, then render
    /// the template file with the same answers.
    #[instrument(skip_all, fields(template = %output.template_file))]
    pub fn render(
        &self,
        base_dir: &Path,
        answers: &AnswerMap,
        output: &Output,
    ) -> PlayforgeResult<RenderedOutput> {
        let relative = self.resolve_path(answers, output)?;
        let path = base_dir.join(relative);

        let content = self
            .engine
            .render_file(&output.template_path(base_dir), answers)?;

        debug!(path = %path.display(), bytes = content.len(), "Output rendered");
        Ok(RenderedOutput { path, content })
    }

    /// Render the output path template. The result must be a non-empty
    /// relative path.
    pub fn resolve_path(&self, answers: &AnswerMap, output: &Output) -> PlayforgeResult<PathBuf> {
        let rendered = self
            .engine
            .render_str("outputFile", &output.output_file, answers)?;
        let rendered = rendered.trim();

        let invalid = |reason: &str| -> ApplicationError {
            RenderError::InvalidOutputPath {
                path: rendered.to_string(),
                reason: reason.into(),
            }
            .into()
        };

        if rendered.is_empty() {
            return Err(invalid("rendered to an empty path").into());
        }

        let path = PathBuf::from(rendered);
        if path
            .components()
            .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
        {
            return Err(invalid("must be relative to the playbook directory").into());
        }

        Ok(path)
    }
}
