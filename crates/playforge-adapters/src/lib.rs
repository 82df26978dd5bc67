//! Infrastructure adapters for Playforge.
//!
//! This crate implements the ports defined in `playforge-core::application::ports`.
//! It contains the YAML, template engine and filesystem dependencies.

pub mod filesystem;
pub mod loader;
pub mod prompt;
pub mod renderer;
pub mod telemetry;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use loader::YamlPlaybookLoader;
pub use prompt::ScriptedPrompter;
pub use renderer::JinjaEngine;
pub use telemetry::{NoopReporter, TracingReporter};
