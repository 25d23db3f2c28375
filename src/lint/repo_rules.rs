//! Built-in project-level and path-level rules

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::Settings;
use crate::repository::Repository;

use super::{LintDefinition, LintFn};

// ============= //
// PROJECT LEVEL //
// ============= //

/// Check that the repository is under version control
pub fn repository_not_versioned(repo: &Repository, _settings: &Settings) -> bool {
    !repo.is_versioned()
}

/// Check that at least one recognized dependency manifest exists at the
/// repository root
pub fn dependencies_unmanaged(repo: &Repository, _settings: &Settings) -> bool {
    !repo
        .manifest_paths()
        .iter()
        .any(|path| path.parent() == Some(repo.root()))
}

// ========== //
// PATH LEVEL //
// ========== //

/// Paths of notebooks sharing a filename with another notebook.
///
/// Filenames are grouped across the whole repository; every path of every
/// repeated filename is returned, in discovery order per filename.
pub fn duplicate_notebook_filename(repo: &Repository, _settings: &Settings) -> Vec<PathBuf> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut duplicates: Vec<&str> = Vec::new();

    for notebook in repo.notebooks() {
        let filename = notebook.file_name();
        if !seen.insert(filename) && !duplicates.contains(&filename) {
            duplicates.push(filename);
        }
    }

    let mut paths = Vec::new();
    for filename in duplicates {
        for notebook in repo.notebooks() {
            if notebook.file_name() == filename {
                paths.push(notebook.path().to_path_buf());
            }
        }
    }
    paths
}

/// Large data files present without a data-version-control marker
pub fn untracked_large_files(repo: &Repository, _settings: &Settings) -> Vec<PathBuf> {
    if repo.uses_dvc() {
        return Vec::new();
    }
    repo.large_file_paths().to_vec()
}

/// The project-level and path-level rules of the core provider
pub fn lints(settings: &Settings) -> Vec<LintDefinition> {
    vec![
        LintDefinition::new(
            "repository-not-versioned",
            "The repository is not under version control: no version-control metadata \
             directory was found.",
            "Track your analysis with a version control system (e.g., git) to make it \
             reproducible and auditable.",
            LintFn::Project(repository_not_versioned),
        ),
        LintDefinition::new(
            "dependencies-unmanaged",
            "Project dependencies are unmanaged: no recognized dependency-declaration \
             file exists at the repository root.",
            "Declare your dependencies in a requirements.txt, environment.yml, \
             pyproject.toml, Pipfile or setup.py to make the environment reproducible.",
            LintFn::Project(dependencies_unmanaged),
        ),
        LintDefinition::new(
            "duplicate-notebook-filename",
            "Two or more notebooks with the same filename exist in this repository.",
            "Use different filenames and possibly stick to a naming convention to make \
             notebooks easily identifiable.",
            LintFn::Path(duplicate_notebook_filename),
        ),
        LintDefinition::new(
            "untracked-large-files",
            format!(
                "Large files (above {} bytes) exist in this repository without a data \
                 version control marker.",
                settings.max_data_file_size
            ),
            "Track large data files with a data versioning tool (e.g., dvc) instead of \
             committing them to the repository.",
            LintFn::Path(untracked_large_files),
        ),
    ]
}
