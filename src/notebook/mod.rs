//! Notebook model
//!
//! A [`Notebook`] is parsed once from `.ipynb` bytes and immutable
//! afterwards: the ordered cell list, the generated script, the syntax tree
//! and the imported-package set are all computed at construction. Cell order
//! equals the order of cells in the source file; it is the basis for the
//! linear-execution and initial/final-cells rules.

mod cell;
mod script;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rustpython_parser::ast::Suite;
use serde::Deserialize;
use thiserror::Error;

pub use cell::{Cell, CellType};
pub use script::{
    CellSpan, Script, count_definitions, imported_packages, parse_module, segment_has_import,
};

/// Errors raised while ingesting a notebook file.
///
/// Both variants are fatal for the notebook concerned; a repository scan
/// records them as diagnostics and carries on with the remaining notebooks.
#[derive(Debug, Error)]
pub enum NotebookError {
    /// The notebook file could not be read
    #[error("cannot read notebook {}: {source}", path.display())]
    Read {
        /// Path of the unreadable notebook
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The notebook file is not valid notebook JSON
    #[error("cannot parse notebook {}: {source}", path.display())]
    Parse {
        /// Path of the malformed notebook
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

/// Raw notebook document, as stored on disk
#[derive(Debug, Deserialize)]
struct RawNotebook {
    #[serde(default)]
    cells: Vec<RawCell>,
}

/// Raw cell, as stored on disk
#[derive(Debug, Deserialize)]
struct RawCell {
    cell_type: String,
    #[serde(default)]
    source: RawSource,
    #[serde(default)]
    execution_count: Option<i64>,
}

/// The notebook format stores cell sources either as a single string or
/// as a list of lines (each keeping its trailing newline)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for RawSource {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl RawSource {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Lines(lines) => lines.concat(),
        }
    }
}

/// A parsed notebook
#[derive(Debug)]
pub struct Notebook {
    path: PathBuf,
    repo_root: Option<PathBuf>,
    cells: Vec<Cell>,
    script: Script,
    syntax_tree: Option<Suite>,
    has_invalid_syntax: bool,
    imported_packages: BTreeSet<String>,
}

impl Notebook {
    /// Read and parse a notebook file
    pub fn from_path(path: &Path) -> Result<Self, NotebookError> {
        let bytes = fs::read(path).map_err(|source| NotebookError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path.to_path_buf(), &bytes)
    }

    /// Parse a notebook from raw bytes; `path` is kept for naming and the
    /// filename-based rules
    pub fn from_bytes(path: PathBuf, bytes: &[u8]) -> Result<Self, NotebookError> {
        let raw: RawNotebook =
            serde_json::from_slice(bytes).map_err(|source| NotebookError::Parse {
                path: path.clone(),
                source,
            })?;

        let mut cells: Vec<Cell> = raw
            .cells
            .into_iter()
            .enumerate()
            .map(|(index, raw_cell)| {
                Cell::new(
                    index,
                    CellType::from_format(&raw_cell.cell_type),
                    raw_cell.source.into_text(),
                    raw_cell.execution_count,
                )
            })
            .collect();

        let code_sources: Vec<(usize, String)> = cells
            .iter()
            .filter(|cell| cell.cell_type() == CellType::Code)
            .map(|cell| (cell.index(), cell.source().to_string()))
            .collect();
        let script = Script::from_code_cells(&code_sources);

        for span in script.spans() {
            cells[span.cell_index].script_line = Some(span.start_line);
        }

        let syntax_tree = parse_module(script.text());
        let has_invalid_syntax = syntax_tree.is_none();
        if has_invalid_syntax {
            log::debug!("{}: script has invalid Python syntax", path.display());
        }
        let imported_packages = syntax_tree
            .as_ref()
            .map(imported_packages)
            .unwrap_or_default();

        Ok(Self {
            path,
            repo_root: None,
            cells,
            script,
            syntax_tree,
            has_invalid_syntax,
            imported_packages,
        })
    }

    /// Record the owning repository's root; affects only the display name
    #[must_use]
    pub fn with_repo_root(mut self, root: &Path) -> Self {
        self.repo_root = Some(root.to_path_buf());
        self
    }

    /// Filesystem path of the notebook
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The notebook filename
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or("")
    }

    /// Display name: the path relative to the owning repository root when
    /// owned, the raw path otherwise
    #[must_use]
    pub fn display_name(&self) -> String {
        self.repo_root
            .as_deref()
            .and_then(|root| self.path.strip_prefix(root).ok())
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }

    /// All cells, in source order
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Total number of cells
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The code cells, in source order
    #[must_use]
    pub fn code_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|c| c.cell_type() == CellType::Code).collect()
    }

    /// The markdown cells, in source order
    #[must_use]
    pub fn markdown_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|c| c.cell_type() == CellType::Markdown).collect()
    }

    /// The first `n` cells
    #[must_use]
    pub fn initial_cells(&self, n: usize) -> &[Cell] {
        &self.cells[..n.min(self.cells.len())]
    }

    /// The last `n` cells
    #[must_use]
    pub fn final_cells(&self, n: usize) -> &[Cell] {
        &self.cells[self.cells.len().saturating_sub(n)..]
    }

    /// `true` if the notebook has code cells and none of them has been
    /// executed
    #[must_use]
    pub fn non_executed(&self) -> bool {
        let code_cells = self.code_cells();
        !code_cells.is_empty() && code_cells.iter().all(|c| c.exec_count().is_none())
    }

    /// The generated script with its per-cell segment map
    #[must_use]
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// The syntax tree of the generated script, when it parses
    #[must_use]
    pub fn syntax_tree(&self) -> Option<&Suite> {
        self.syntax_tree.as_ref()
    }

    /// `true` when the generated script is not valid Python.
    ///
    /// Syntax-dependent rules treat such a notebook as unanalyzable and
    /// report no finding; this flag is how callers tell "rule passed"
    /// apart from "rule could not run".
    #[must_use]
    pub fn has_invalid_syntax(&self) -> bool {
        self.has_invalid_syntax
    }

    /// Top-level package names imported anywhere in the notebook; empty
    /// when the script has invalid syntax
    #[must_use]
    pub fn imported_packages(&self) -> &BTreeSet<String> {
        &self.imported_packages
    }
}
