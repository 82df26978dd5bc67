//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "validate a playbook" or "run a playbook".

pub mod playbook_service;
pub mod render_service;
pub mod run_service;
pub mod write_service;

pub use playbook_service::PlaybookService;
pub use render_service::{RenderService, RenderedOutput};
pub use run_service::{PlaybookRunner, RunReport, WrittenOutput};
pub use write_service::{OutputWriter, WriteAction, WritePolicy};
