//! Playbook document loaders.

mod yaml;

pub use yaml::{OutputEntry, PlaybookManifest, QuestionEntry, RangeEntry, Scalar, YamlPlaybookLoader};
