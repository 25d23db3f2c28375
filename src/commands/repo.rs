//! Repo command - lint a local repository directory or zip archive

use std::path::Path;

use nblint::config::Settings;
use nblint::lint;
use nblint::linter::RepoLinter;
use nblint::output::OutputMode;
use nblint::repository::{Repository, acquire};

use super::{EXIT_CLEAN, EXIT_FINDINGS};

/// Lint a local repository and render the result.
///
/// Zip archives are extracted into a scratch directory owned by this
/// function; it is removed once the report has been rendered.
pub fn repo(path: &Path, settings: &Settings, mode: OutputMode) -> anyhow::Result<i32> {
    let registry = lint::load(settings)?;

    let scratch = tempfile::TempDir::new()?;
    let root = acquire::materialize(path, scratch.path())?;
    let repository = Repository::scan(&root, settings)?;
    let report = RepoLinter::new(&repository, &registry, settings).into_report();

    report.render(mode);

    if report.has_findings() {
        Ok(EXIT_FINDINGS)
    } else {
        Ok(EXIT_CLEAN)
    }
}
