//! `playforge validate`: load and check a playbook without asking anything.

use serde_json::json;
use tracing::instrument;

use playforge_core::application::PlaybookService;

use super::Adapters;
use crate::{cli::ValidateArgs, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(playbook = %args.playbook.display()))]
pub fn execute(args: ValidateArgs, output: OutputManager) -> CliResult<()> {
    let adapters = Adapters::local();
    let service = PlaybookService::new(adapters.loader, adapters.engine);

    let playbook = service.load_and_validate(&args.playbook)?;

    if output.is_json() {
        output.json(&json!({
            "playbook": playbook.name,
            "path": args.playbook,
            "valid": true,
            "questions": playbook.questions.len(),
            "outputs": playbook.outputs.len(),
        }))?;
    } else {
        output.success(&format!("Playbook {} is valid", playbook.name))?;
    }
    Ok(())
}
