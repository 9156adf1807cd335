//! CLI configuration

use std::path::{Path, PathBuf};

use deskcalc::analytics;
use deskcalc::clock::ClockFormat;
use deskcalc::core::OperatorConfig;
use deskcalc::meta::PageMeta;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "deskcalc.yaml";

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings and errors
    #[default]
    Normal,
    /// Informational output
    Verbose,
    /// Everything, including each key transition
    Debug,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default tracing directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// `analytics:` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSection {
    /// Measurement id; analytics stays off without one
    pub tracking_id: Option<String>,
}

/// `clock:` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSection {
    /// Display mode of the clock
    pub format: ClockFormat,
}

/// Contents of `deskcalc.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Analytics settings
    pub analytics: AnalyticsSection,
    /// Clock settings
    pub clock: ClockSection,
    /// Operators the evaluator accepts
    pub operators: OperatorConfig,
    /// Page head metadata
    pub meta: PageMeta,
}

impl DeskConfig {
    /// Parses YAML text; an empty document yields the defaults
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Reads and parses a config file
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&text)
    }

    /// Serializes to YAML
    pub fn to_yaml(&self) -> CliResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Replaces the tracking id when `id` is set
    #[must_use]
    pub fn with_tracking_id(mut self, id: Option<String>) -> Self {
        if id.is_some() {
            self.analytics.tracking_id = id;
        }
        self
    }
}

/// Picks the config file: the explicit path, else `./deskcalc.yaml` if present
#[must_use]
pub fn config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = cwd.join(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Loads the effective configuration
///
/// An explicit path must exist. The environment tracking id wins over the
/// file's.
pub fn load(explicit: Option<&Path>) -> CliResult<DeskConfig> {
    let cwd = std::env::current_dir()?;
    let config = match config_path(explicit, &cwd) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            DeskConfig::from_file(&path)?
        }
        None => DeskConfig::default(),
    };
    Ok(config.with_tracking_id(analytics::tracking_id_from_env()))
}

/// CLI configuration
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Loaded settings
    pub desk: DeskConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the loaded settings
    #[must_use]
    pub fn with_desk(mut self, desk: DeskConfig) -> Self {
        self.desk = desk;
        self
    }
}
