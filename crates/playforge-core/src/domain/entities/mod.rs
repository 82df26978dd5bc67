pub mod playbook;

pub use playbook::{IntegerRange, Output, Playbook, Question};
