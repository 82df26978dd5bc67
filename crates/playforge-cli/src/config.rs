//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here; run flags OR into
//!    `run.*`)
//! 2. Environment variables: `PLAYFORGE_` prefix, `__` between sections,
//!    e.g. `PLAYFORGE_RUN__APPEND=true`
//! 3. Config file: `--config FILE`, else `<config dir>/playforge/config.toml`
//! 4. Built-in defaults (always present)
//!
//! `PLAYFORGE_TELEMETRY_DISABLED=true` is honoured on top of all of these.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "PLAYFORGE";
const TELEMETRY_DISABLED_VAR: &str = "PLAYFORGE_TELEMETRY_DISABLED";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `playforge run`.
    pub run: RunConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Error reporting.
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    pub overwrite: bool,
    pub append: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the process
    /// environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let config = Self::load_from(config_file, Environment::with_prefix(ENV_PREFIX))?;
        let disabled = std::env::var(TELEMETRY_DISABLED_VAR).ok();
        Ok(config.with_telemetry_override(disabled.as_deref()))
    }

    fn load_from(config_file: Option<&PathBuf>, environment: Environment) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("run.overwrite", defaults.run.overwrite)?
            .set_default("run.append", defaults.run.append)?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format.as_str())?
            .set_default("telemetry.enabled", defaults.telemetry.enabled)?
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Apply the legacy `PLAYFORGE_TELEMETRY_DISABLED` switch.
    fn with_telemetry_override(mut self, disabled: Option<&str>) -> Self {
        if disabled.is_some_and(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1") {
            self.telemetry.enabled = false;
        }
        self
    }

    /// Look up a single dotted key, as accepted by `playforge config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "run.overwrite" => self.run.overwrite.to_string(),
            "run.append" => self.run.append.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            "telemetry.enabled" => self.telemetry.enabled.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.playforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "playforge", "playforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".playforge.toml"))
    }

    /// The file `config_file` points at, or the default location.
    pub fn resolve_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }
}
