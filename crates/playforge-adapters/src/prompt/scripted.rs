//! Prompter that answers from a pre-recorded script.
//!
//! Used for tests and non-interactive runs. Each prompt consumes the next
//! answer; an empty script fails the prompt instead of blocking.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::debug;

use playforge_core::{
    application::{ApplicationError, PromptError, ports::Prompter},
    domain::{InputValidationError, Question},
    error::{PlayforgeError, PlayforgeResult},
};

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    rejections: Mutex<Vec<(String, String)>>,
    transcript: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// `(variable, message)` for every answer that was rejected, in order.
    pub fn rejections(&self) -> Vec<(String, String)> {
        self.rejections
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Labels of every prompt shown, in order.
    pub fn transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or(0)
    }

    fn next(&self, label: &str) -> PlayforgeResult<String> {
        if let Ok(mut transcript) = self.transcript.lock() {
            transcript.push(label.to_string());
        }

        let answer = self
            .answers
            .lock()
            .map_err(|_| prompt_error(PromptError::Io {
                reason: "answer script lock poisoned".into(),
            }))?
            .pop_front();

        answer.ok_or_else(|| {
            prompt_error(PromptError::Exhausted {
                label: label.to_string(),
            })
        })
    }
}

fn prompt_error(error: PromptError) -> PlayforgeError {
    ApplicationError::from(error).into()
}

impl Prompter for ScriptedPrompter {
    fn select(&self, label: &str, items: &[String]) -> PlayforgeResult<String> {
        let answer = self.next(label)?;
        if items.contains(&answer) {
            Ok(answer)
        } else {
            Err(prompt_error(PromptError::Io {
                reason: format!("'{answer}' is not one of {}", items.join(", ")),
            }))
        }
    }

    fn text(
        &self,
        label: &str,
        _default: Option<&str>,
        _placeholder: Option<&str>,
    ) -> PlayforgeResult<String> {
        self.next(label)
    }

    /// Skips anything that is not yes/y/no/n, like a terminal asking again.
    fn confirm(&self, message: &str) -> PlayforgeResult<bool> {
        loop {
            match self.next(message)?.trim().to_ascii_lowercase().as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                other => debug!(answer = other, "Expected yes or no"),
            }
        }
    }

    fn report_invalid(&self, question: &Question, error: &InputValidationError) {
        if let Ok(mut rejections) = self.rejections.lock() {
            rejections.push((question.variable_name.clone(), error.to_string()));
        }
    }
}
