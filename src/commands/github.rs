//! Github command - clone a remote repository and lint it

use nblint::config::Settings;
use nblint::lint;
use nblint::linter::RepoLinter;
use nblint::output::OutputMode;
use nblint::repository::{Repository, acquire};

use super::{EXIT_CLEAN, EXIT_FINDINGS};

/// Clone `url` into a scratch directory, lint it, render the result.
///
/// The scratch directory lives until the report has been rendered.
pub fn github(url: &str, settings: &Settings, mode: OutputMode) -> anyhow::Result<i32> {
    let registry = lint::load(settings)?;

    let scratch = tempfile::TempDir::new()?;
    let root = acquire::clone_remote(url, scratch.path())?;
    let repository = Repository::scan(&root, settings)?;
    let report = RepoLinter::new(&repository, &registry, settings).into_report();

    report.render(mode);

    if report.has_findings() {
        Ok(EXIT_FINDINGS)
    } else {
        Ok(EXIT_CLEAN)
    }
}
