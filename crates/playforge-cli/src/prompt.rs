//! Terminal prompter built on `dialoguer`.

use std::io;

use console::Term;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use owo_colors::OwoColorize;

use playforge_core::{
    application::{ApplicationError, PromptError, ports::Prompter},
    domain::{InputValidationError, Question},
    error::{PlayforgeError, PlayforgeResult},
};

/// Asks questions on stderr so stdout stays clean for command output.
pub struct TerminalPrompter {
    term: Term,
    no_color: bool,
}

impl TerminalPrompter {
    pub fn new(no_color: bool) -> Self {
        Self {
            term: Term::stderr(),
            no_color,
        }
    }
}

fn prompt_error(err: dialoguer::Error) -> PlayforgeError {
    let error = match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => PromptError::Cancelled,
        other => PromptError::Io {
            reason: other.to_string(),
        },
    };
    ApplicationError::from(error).into()
}

/// dialoguer has no placeholder support; show it as a hint after the label.
fn label_with_hint(label: &str, placeholder: Option<&str>) -> String {
    match placeholder {
        Some(hint) if !hint.is_empty() => format!("{label} (e.g. {hint})"),
        _ => label.to_string(),
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, label: &str, items: &[String]) -> PlayforgeResult<String> {
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .items(items)
            .default(0)
            .interact_on(&self.term)
            .map_err(prompt_error)?;

        items.get(index).cloned().ok_or_else(|| {
            ApplicationError::from(PromptError::Io {
                reason: format!("selection {index} is out of range"),
            })
            .into()
        })
    }

    fn text(
        &self,
        label: &str,
        default: Option<&str>,
        placeholder: Option<&str>,
    ) -> PlayforgeResult<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(label_with_hint(label, placeholder))
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string()).show_default(true);
        }
        input.interact_text_on(&self.term).map_err(prompt_error)
    }

    fn confirm(&self, message: &str) -> PlayforgeResult<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .interact_on(&self.term)
            .map_err(prompt_error)
    }

    fn report_invalid(&self, question: &Question, error: &InputValidationError) {
        let line = if self.no_color {
            format!("\u{2717} {}: {error}", question.variable_name)
        } else {
            format!(
                "{} {}",
                "\u{2717}".red().bold(),
                format!("{}: {error}", question.variable_name).red()
            )
        };
        // Nothing sensible to do if stderr is gone; the question is asked again.
        let _ = self.term.write_line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_shown_as_hint() {
        assert_eq!(
            label_with_hint("Subdomain", Some("www")),
            "Subdomain (e.g. www)"
        );
        assert_eq!(label_with_hint("Subdomain", Some("")), "Subdomain");
        assert_eq!(label_with_hint("Subdomain", None), "Subdomain");
    }

    #[test]
    fn interrupted_prompt_is_a_cancel() {
        let err = prompt_error(dialoguer::Error::IO(io::Error::from(io::ErrorKind::Interrupted)));
        assert!(err.is_user_abort());

        let err = prompt_error(dialoguer::Error::IO(io::Error::other("not a tty")));
        assert!(!err.is_user_abort());
    }
}
