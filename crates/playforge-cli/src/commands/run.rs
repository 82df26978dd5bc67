//! `playforge run`: ask a playbook's questions and write its outputs.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, instrument};

use playforge_adapters::telemetry;
use playforge_core::application::{PlaybookRunner, RunReport, WritePolicy, ports::Prompter};

use super::Adapters;
use crate::{cli::RunArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Execute the `playforge run` command.
#[instrument(skip_all, fields(playbook = %args.playbook.display()))]
pub fn execute(args: RunArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let policy = WritePolicy::new(
        args.overwrite || config.run.overwrite,
        args.append || config.run.append,
    );
    debug!(
        overwrite = policy.overwrite,
        append = policy.append,
        telemetry = config.telemetry.enabled,
        "Write policy resolved"
    );

    let prompter = terminal_prompter(&output)?;
    let adapters = Adapters::local();
    let runner = PlaybookRunner::new(
        adapters.loader,
        adapters.engine,
        adapters.filesystem,
        prompter,
        telemetry::reporter(config.telemetry.enabled),
    );

    if !output.is_json() {
        output.info(&format!("Running playbook {}", args.playbook.display()))?;
    }

    let report = runner.run(&args.playbook, policy)?;
    print_report(&report, &output)
}

fn print_report(report: &RunReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        let outputs: Vec<_> = report
            .outputs
            .iter()
            .map(|o| json!({ "path": o.path, "action": o.action.as_str() }))
            .collect();
        output.json(&json!({
            "playbook": report.playbook,
            "answers": report.answers,
            "outputs": outputs,
        }))?;
        return Ok(());
    }

    for written in &report.outputs {
        output.success(&format!(
            "Output saved to {} ({})",
            written.path.display(),
            written.action
        ))?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn terminal_prompter(output: &OutputManager) -> CliResult<Arc<dyn Prompter>> {
    Ok(Arc::new(crate::prompt::TerminalPrompter::new(
        !output.supports_color(),
    )))
}

#[cfg(not(feature = "interactive"))]
fn terminal_prompter(_output: &OutputManager) -> CliResult<Arc<dyn Prompter>> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
