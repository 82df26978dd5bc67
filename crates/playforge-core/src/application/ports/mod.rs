//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `playforge-adapters` and the
//! terminal prompter in `playforge-cli` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `PlaybookLoader`: Document parsing
//!   - `Prompter`: Operator interaction
//!   - `TemplateEngine`: Template checking and rendering
//!   - `Filesystem`: File operations
//!   - `ErrorReporter`: Failure telemetry
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The CLI calls the services directly)

pub mod output;

pub use output::{ErrorReporter, Filesystem, PlaybookLoader, Prompter, TemplateEngine};

#[cfg(test)]
pub use output::{MockErrorReporter, MockFilesystem};
