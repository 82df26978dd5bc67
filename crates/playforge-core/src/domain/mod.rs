// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Playforge.
//!
//! Pure playbook logic: the model, condition evaluation, answer validation
//! and structural playbook checks. No filesystem, terminal or template
//! engine access happens here; those sit behind the application ports.
//!
//! - **No I/O**: documents arrive already parsed into [`Playbook`]
//! - **Synchronous**: one run, one thread
//! - **Immutable model**: a playbook is not changed once loaded

pub mod condition;
pub mod entities;
pub mod error;
pub mod input_validation;
pub mod value_objects;

mod validation;

pub use condition::{Condition, Operator};
pub use entities::{IntegerRange, Output, Playbook, Question};
pub use error::{
    ConditionError, DomainError, ErrorCategory, InputValidationError, PlaybookViolation,
};
pub use input_validation::InputValidator;
pub use validation::DomainValidator;
pub use value_objects::{AnswerMap, AnswerValue, InputType, UrlPattern, ValidationRule};
