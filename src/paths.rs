//! Centralized path definitions for nblint
//!
//! ## Lookup order for configuration
//!
//! ```text
//! ./nblint.toml                 # per-project, committed
//! ~/.config/nblint/config.toml  # user preferences (XDG standard)
//! ```

use std::path::PathBuf;

/// Project configuration filename, looked up in the working directory
pub const CONFIG_FILENAME: &str = "nblint.toml";

/// Directory name used by Jupyter for autosave copies; always skipped
/// during repository scans
pub const CHECKPOINT_DIR: &str = ".ipynb_checkpoints";

/// Get the user-level config directory (`~/.config/nblint`)
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("nblint")
}

/// Get the user-level config file path
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join("config.toml")
}
