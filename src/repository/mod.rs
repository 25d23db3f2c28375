//! Repository model
//!
//! A [`Repository`] is built by a single recursive scan of a local
//! directory tree: it discovers notebooks (skipping Jupyter checkpoint
//! directories), detects version-control and data-version-control markers,
//! aggregates declared dependencies from every recognized manifest, and
//! collects oversized files. A notebook that fails to parse is recorded as
//! a diagnostic and skipped; the scan itself only fails when the root is
//! not a directory.

pub mod acquire;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Settings;
use crate::manifest;
use crate::notebook::Notebook;
use crate::paths;

/// Version-control metadata directory
const GIT_DIR: &str = ".git";

/// Data-version-control marker directory
const DVC_DIR: &str = ".dvc";

/// Errors raised while building a repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The source path is neither a directory nor a zip archive
    #[error("invalid repository source: {} is neither a directory nor a zip archive", .0.display())]
    InvalidSource(PathBuf),

    /// An I/O error outside the per-file scan loop
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A zip archive could not be extracted
    #[error("cannot extract archive {}: {source}", path.display())]
    Zip {
        /// Path of the archive
        path: PathBuf,
        /// Underlying zip error
        source: zip::result::ZipError,
    },

    /// A remote repository could not be cloned
    #[error("cannot clone {url}: {source}")]
    Clone {
        /// The remote URL
        url: String,
        /// Underlying git error
        source: git2::Error,
    },
}

/// A notebook that could not be ingested during the scan
#[derive(Debug, Clone)]
pub struct SkippedNotebook {
    /// Path of the notebook
    pub path: PathBuf,
    /// Why ingestion failed
    pub reason: String,
}

/// A scanned repository of notebooks
#[derive(Debug)]
pub struct Repository {
    root: PathBuf,
    notebooks: Vec<Notebook>,
    versioned: bool,
    uses_dvc: bool,
    declared_dependencies: BTreeSet<String>,
    manifest_paths: Vec<PathBuf>,
    large_files: Vec<PathBuf>,
    skipped: Vec<SkippedNotebook>,
}

impl Repository {
    /// Scan `root` and build the repository model.
    ///
    /// The walk skips `.ipynb_checkpoints` directories entirely and does
    /// not descend into `.git`/`.dvc` internals (their presence is still
    /// recorded). Unreadable directory entries are logged and skipped.
    pub fn scan(root: &Path, settings: &Settings) -> Result<Self, RepositoryError> {
        if !root.is_dir() {
            return Err(RepositoryError::InvalidSource(root.to_path_buf()));
        }

        let mut versioned = false;
        let mut uses_dvc = false;
        let mut notebook_paths: Vec<PathBuf> = Vec::new();
        let mut manifest_paths: Vec<PathBuf> = Vec::new();
        let mut large_files: Vec<PathBuf> = Vec::new();

        let mut walker = walkdir::WalkDir::new(root).sort_by_file_name().into_iter();
        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable entry: {err}");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                match entry.file_name().to_str() {
                    Some(GIT_DIR) => {
                        versioned = true;
                        walker.skip_current_dir();
                    }
                    Some(DVC_DIR) => {
                        uses_dvc = true;
                        walker.skip_current_dir();
                    }
                    Some(paths::CHECKPOINT_DIR) => walker.skip_current_dir(),
                    _ => {}
                }
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let file_name = entry.file_name().to_str().unwrap_or("");

            if path.extension().is_some_and(|ext| ext == "ipynb") {
                notebook_paths.push(path.to_path_buf());
            } else if manifest::is_manifest(file_name) {
                manifest_paths.push(path.to_path_buf());
            }

            match entry.metadata() {
                Ok(metadata) if metadata.len() > settings.max_data_file_size => {
                    large_files.push(path.to_path_buf());
                }
                Ok(_) => {}
                Err(err) => log::warn!("cannot stat {}: {err}", path.display()),
            }
        }

        let mut notebooks = Vec::with_capacity(notebook_paths.len());
        let mut skipped = Vec::new();
        for path in notebook_paths {
            match Notebook::from_path(&path) {
                Ok(notebook) => notebooks.push(notebook.with_repo_root(root)),
                Err(err) => {
                    log::warn!("{err}");
                    skipped.push(SkippedNotebook {
                        path,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let mut declared_dependencies = BTreeSet::new();
        for path in &manifest_paths {
            match manifest::declared_packages(path) {
                Ok(packages) => declared_dependencies.extend(packages),
                Err(err) => log::warn!("{err}; ignoring its declared dependencies"),
            }
        }

        log::debug!(
            "scanned {}: {} notebook(s), {} manifest(s), versioned={versioned}",
            root.display(),
            notebooks.len(),
            manifest_paths.len(),
        );

        Ok(Self {
            root: root.to_path_buf(),
            notebooks,
            versioned,
            uses_dvc,
            declared_dependencies,
            manifest_paths,
            large_files,
            skipped,
        })
    }

    /// Root path of the repository
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Repository name: the root directory's name
    #[must_use]
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(".")
            .to_string()
    }

    /// The discovered notebooks, in discovery order
    #[must_use]
    pub fn notebooks(&self) -> &[Notebook] {
        &self.notebooks
    }

    /// `true` if a version-control metadata directory was found
    #[must_use]
    pub fn is_versioned(&self) -> bool {
        self.versioned
    }

    /// `true` if a data-version-control marker directory was found
    #[must_use]
    pub fn uses_dvc(&self) -> bool {
        self.uses_dvc
    }

    /// Package names declared across every recognized manifest in the tree
    #[must_use]
    pub fn declared_dependencies(&self) -> &BTreeSet<String> {
        &self.declared_dependencies
    }

    /// Paths of every recognized dependency manifest found in the tree
    #[must_use]
    pub fn manifest_paths(&self) -> &[PathBuf] {
        &self.manifest_paths
    }

    /// Files whose size exceeds the configured threshold
    #[must_use]
    pub fn large_file_paths(&self) -> &[PathBuf] {
        &self.large_files
    }

    /// Notebooks whose ingestion failed, with the reason
    #[must_use]
    pub fn skipped_notebooks(&self) -> &[SkippedNotebook] {
        &self.skipped
    }
}
