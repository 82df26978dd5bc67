//! Non-interactive prompter adapters. The terminal prompter lives in the CLI.

mod scripted;

pub use scripted::ScriptedPrompter;
