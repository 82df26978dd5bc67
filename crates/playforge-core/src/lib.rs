//! Playforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Playforge
//! playbook engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          playforge-cli (CLI)            │
//! │   (clap commands, terminal prompter)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (PlaybookRunner, PlaybookService, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Loader, Prompter, Engine, Filesystem)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   playforge-adapters (Infrastructure)   │
//! │ (YAML loader, minijinja, filesystems)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Playbook, Condition, InputValidator)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use playforge_core::prelude::*;
//!
//! let runner = PlaybookRunner::new(
//!     Arc::new(loader),     // impl PlaybookLoader
//!     Arc::new(engine),     // impl TemplateEngine
//!     Arc::new(filesystem), // impl Filesystem
//!     Arc::new(prompter),   // impl Prompter
//!     Arc::new(reporter),   // impl ErrorReporter
//! );
//! let report = runner.run("playbooks/zone.yaml".as_ref(), WritePolicy::default())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        OutputWriter, PlaybookRunner, PlaybookService, RenderService, RunReport, WriteAction,
        WritePolicy, WrittenOutput,
        ports::{ErrorReporter, Filesystem, PlaybookLoader, Prompter, TemplateEngine},
    };
    pub use crate::domain::{
        AnswerMap, AnswerValue, Condition, InputType, InputValidationError, InputValidator,
        IntegerRange, Output, Playbook, Question, ValidationRule,
    };
    pub use crate::error::{ErrorCategory, PlayforgeError, PlayforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
