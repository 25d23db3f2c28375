//! Linter configuration
//!
//! All thresholds, windows and rule filters recognized by the engine live in
//! [`Settings`]. A settings value is loaded once per run (from `nblint.toml`
//! in the working directory, falling back to the user config file) and is
//! passed explicitly to the registry and the orchestrators; there is no
//! process-global configuration state.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Errors raised while loading or validating the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Both an include-set and an exclude-set were supplied
    #[error("`include` and `exclude` cannot be configured at the same time")]
    ConflictingFilters,

    /// A configured rule provider id is not in the provider manifest
    #[error("unknown rule provider: {0}")]
    UnknownProvider(String),

    /// The configuration file could not be read
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How cell sources are rendered in human-readable output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellRenderingMode {
    /// Render the full cell source
    Full,
    /// Render the first and last line of cells longer than two lines
    #[default]
    Compact,
}

/// Linter settings
///
/// Every field has a default, so an empty TOML file (or no file at all)
/// yields a fully usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Rule providers to load; `None` loads every built-in provider
    pub providers: Option<Vec<String>>,

    /// Slugs of the only rules to enable (mutually exclusive with `exclude`)
    pub include: Option<BTreeSet<String>>,

    /// Slugs of rules to disable (mutually exclusive with `include`)
    pub exclude: Option<BTreeSet<String>>,

    /// Size of the initial-cells window used by opening-prose rules
    pub initial_cells: usize,

    /// Size of the final-cells window used by closing-prose rules
    pub final_cells: usize,

    /// Minimum acceptable ratio of markdown cells to code cells
    pub min_md_code_ratio: f64,

    /// Maximum number of cells before a notebook counts as too long
    pub max_cells_in_notebook: usize,

    /// Maximum number of source lines in a single code cell
    pub max_lines_in_code_cell: usize,

    /// Maximum filename length; the filename-length rule is disabled
    /// when unset
    pub max_filename_length: Option<usize>,

    /// Size in bytes above which a data file counts as large
    pub max_data_file_size: u64,

    /// Rendering verbosity for affected cells in human output
    pub cell_rendering_mode: CellRenderingMode,

    /// Whether to print the cell index next to rendered cells
    pub display_cell_index: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            providers: None,
            include: None,
            exclude: None,
            initial_cells: 3,
            final_cells: 3,
            min_md_code_ratio: 0.3,
            max_cells_in_notebook: 50,
            max_lines_in_code_cell: 30,
            max_filename_length: None,
            max_data_file_size: 10_485_760,
            cell_rendering_mode: CellRenderingMode::default(),
            display_cell_index: false,
        }
    }
}

impl Settings {
    /// Load settings for this run.
    ///
    /// An explicit `path` is always honored (and failing to read it is an
    /// error). Otherwise `nblint.toml` in the working directory is tried,
    /// then the user config file; when neither exists the defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let local = Path::new(paths::CONFIG_FILENAME);
        if local.is_file() {
            return Self::from_file(local);
        }

        let global = paths::global_config();
        if global.is_file() {
            return Self::from_file(&global);
        }

        Ok(Self::default())
    }

    /// Parse settings from a TOML file and validate them
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)?;
        settings.validate()?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Validate the configuration.
    ///
    /// Configuring both an include-set and an exclude-set is rejected here,
    /// before any rule is registered or executed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let include_set = self.include.as_ref().is_some_and(|s| !s.is_empty());
        let exclude_set = self.exclude.as_ref().is_some_and(|s| !s.is_empty());
        if include_set && exclude_set {
            return Err(ConfigError::ConflictingFilters);
        }
        Ok(())
    }
}
