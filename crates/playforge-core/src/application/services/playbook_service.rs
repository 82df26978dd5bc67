//! Playbook Service - load a playbook and check it before anything is asked.
//!
//! Validation is two passes: the pure structural checks from the domain, then
//! a syntax check of every output template through the template engine.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{PlaybookLoader, TemplateEngine},
    domain::{DomainError, DomainValidator as validator, Playbook, PlaybookViolation},
    error::PlayforgeResult,
};

pub struct PlaybookService {
    loader: Arc<dyn PlaybookLoader>,
    engine: Arc<dyn TemplateEngine>,
}

impl PlaybookService {
    pub fn new(loader: Arc<dyn PlaybookLoader>, engine: Arc<dyn TemplateEngine>) -> Self {
        Self { loader, engine }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> PlayforgeResult<Playbook> {
        let playbook = self.loader.load(path)?;
        debug!(
            name = %playbook.name,
            questions = playbook.questions.len(),
            outputs = playbook.outputs.len(),
            "Playbook loaded"
        );
        Ok(playbook)
    }

    /// Check `playbook`, resolving template files against `base_dir`.
    ///
    /// Stops at the first violation.
    #[instrument(skip_all, fields(playbook = %playbook.name))]
    pub fn validate(&self, playbook: &Playbook, base_dir: &Path) -> PlayforgeResult<()> {
        validator::validate_playbook(playbook)?;

        for (index, output) in playbook.outputs.iter().enumerate() {
            let path = output.template_path(base_dir);
            self.engine.check(&path).map_err(|e| {
                DomainError::from(PlaybookViolation::InvalidTemplate {
                    position: index + 1,
                    template: output.template_file.clone(),
                    reason: e.to_string(),
                })
            })?;
        }

        info!("Playbook is valid");
        Ok(())
    }

    /// Load the playbook at `path` and validate it against its own directory.
    pub fn load_and_validate(&self, path: &Path) -> PlayforgeResult<Playbook> {
        let playbook = self.load(path)?;
        self.validate(&playbook, &base_dir(path))?;
        Ok(playbook)
    }
}

/// Directory the playbook's relative paths are resolved against.
pub fn base_dir(playbook_path: &Path) -> std::path::PathBuf {
    playbook_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
