//! YAML playbook loader.
//!
//! Parses a playbook document into the domain [`Playbook`]. Every field is
//! optional at this stage: a document that parses but is missing a name,
//! questions or outputs loads fine and is rejected by the playbook validator
//! with a precise message.
//!
//! # Document format
//!
//! ```yaml
//! name: New Zone Record
//! description: Create a DNS record     # optional
//! questions:
//!   - prompt: Enter the subdomain
//!     variableName: subdomain_name
//!     inputType: textfield             # select | textfield
//!     variableType: string
//!   - prompt: Record type
//!     variableName: record_type
//!     inputType: select
//!     variableType: string
//!     validValues: [A, CNAME]
//!   - prompt: TTL
//!     variableName: ttl
//!     inputType: textfield
//!     variableType: int
//!     default: 3600
//!     validation: integer_range
//!     range: { min: 0, max: 3600 }
//!     if: record_type == A
//! outputs:
//!   - templateFile: zone_record.tpl
//!     outputFile: "terraform/{{ subdomain_name }}.tf"
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use playforge_core::{
    application::{ApplicationError, LoadError, ports::Filesystem, ports::PlaybookLoader},
    domain::{InputType, IntegerRange, Output, Playbook, Question},
    error::PlayforgeResult,
};

use crate::filesystem::LocalFilesystem;

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a playbook document.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PlaybookManifest {
    pub name: String,
    pub description: Option<String>,
    pub questions: Vec<QuestionEntry>,
    pub outputs: Vec<OutputEntry>,
}

/// One entry under `questions:`.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionEntry {
    pub prompt: String,
    pub variable_name: String,
    pub input_type: String,
    pub variable_type: String,
    pub valid_values: Vec<Scalar>,
    pub default: Option<Scalar>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub validation: Option<String>,
    pub custom_regex_validation: Option<String>,
    pub valid_patterns: Vec<String>,
    pub range: Option<RangeEntry>,
    #[serde(rename = "if")]
    pub condition: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(default)]
pub struct RangeEntry {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// One entry under `outputs:`.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputEntry {
    pub template_file: String,
    pub output_file: String,
}

/// A YAML scalar kept as text, so `default: 3600` and `default: "3600"` mean
/// the same thing.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<PlaybookManifest> for Playbook {
    fn from(manifest: PlaybookManifest) -> Self {
        Self {
            name: manifest.name,
            description: manifest.description,
            questions: manifest.questions.into_iter().map(Question::from).collect(),
            outputs: manifest.outputs.into_iter().map(Output::from).collect(),
        }
    }
}

impl From<QuestionEntry> for Question {
    fn from(entry: QuestionEntry) -> Self {
        Self {
            prompt: entry.prompt,
            variable_name: entry.variable_name,
            input_type: InputType::from(entry.input_type.as_str()),
            variable_type: entry.variable_type,
            valid_values: entry.valid_values.iter().map(ToString::to_string).collect(),
            default: entry.default.map(|d| d.to_string()),
            placeholder: entry.placeholder,
            required: entry.required,
            validation: entry.validation.filter(|v| !v.is_empty()),
            custom_regex_validation: entry.custom_regex_validation.filter(|v| !v.is_empty()),
            valid_patterns: entry.valid_patterns,
            range: entry.range.map(|r| IntegerRange {
                min: r.min,
                max: r.max,
            }),
            condition: entry.condition.filter(|c| !c.trim().is_empty()),
        }
    }
}

impl From<OutputEntry> for Output {
    fn from(entry: OutputEntry) -> Self {
        Output::new(entry.template_file, entry.output_file)
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads playbooks from YAML documents read through a [`Filesystem`].
pub struct YamlPlaybookLoader {
    filesystem: Arc<dyn Filesystem>,
}

impl YamlPlaybookLoader {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Parse a document that is already in memory. `path` is only used in
    /// error messages.
    pub fn parse(path: &Path, source: &str) -> PlayforgeResult<Playbook> {
        if source.trim().is_empty() {
            return Ok(Playbook::default());
        }

        let manifest: PlaybookManifest = serde_yaml::from_str(source).map_err(|e| {
            ApplicationError::from(LoadError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })?;

        Ok(manifest.into())
    }
}

impl Default for YamlPlaybookLoader {
    fn default() -> Self {
        Self::new(Arc::new(LocalFilesystem::new()))
    }
}

impl PlaybookLoader for YamlPlaybookLoader {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> PlayforgeResult<Playbook> {
        let source = self.filesystem.read_to_string(path)?;
        let playbook = Self::parse(path, &source)?;
        debug!(name = %playbook.name, "Parsed playbook document");
        Ok(playbook)
    }
}
