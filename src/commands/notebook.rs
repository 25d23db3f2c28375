//! Notebook command - lint a single notebook file

use std::path::Path;

use nblint::config::Settings;
use nblint::lint;
use nblint::linter::NotebookLinter;
use nblint::notebook::Notebook;
use nblint::output::OutputMode;

use super::{EXIT_CLEAN, EXIT_FINDINGS};

/// Lint one `.ipynb` file and render the result
pub fn notebook(path: &Path, settings: &Settings, mode: OutputMode) -> anyhow::Result<i32> {
    let registry = lint::load(settings)?;
    let notebook = Notebook::from_path(path)?;
    let report = NotebookLinter::new(&notebook, &registry, settings).into_report();

    report.render(mode);

    if report.has_findings() {
        Ok(EXIT_FINDINGS)
    } else {
        Ok(EXIT_CLEAN)
    }
}
