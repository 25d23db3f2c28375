//! Repository linter

use std::path::Path;

use crate::config::Settings;
use crate::lint::{LintFn, LintRegistry};
use crate::output::{Finding, RepoReport, RepositoryMetadata, RepositoryStats};
use crate::repository::Repository;

use super::{NotebookLinter, run_guarded};

/// Executes every registered project-level and path-level rule against a
/// repository, plus one [`NotebookLinter`] per contained notebook
#[derive(Debug)]
pub struct RepoLinter {
    report: RepoReport,
}

impl RepoLinter {
    /// Lint `repo` with the rules enabled in `registry`
    #[must_use]
    pub fn new(repo: &Repository, registry: &LintRegistry, settings: &Settings) -> Self {
        let metadata = RepositoryMetadata {
            repository_name: repo.name(),
        };
        let stats = RepositoryStats {
            number_of_notebooks: repo.notebooks().len(),
        };

        let mut findings = Vec::new();

        for definition in registry.project_lints() {
            let LintFn::Project(eval) = definition.function else {
                continue;
            };
            let fired = run_guarded(&definition.slug, || eval(repo, settings)).unwrap_or(false);
            if fired {
                findings.push(Finding::flag(definition));
            }
        }

        for definition in registry.path_lints() {
            let LintFn::Path(eval) = definition.function else {
                continue;
            };
            let paths =
                run_guarded(&definition.slug, || eval(repo, settings)).unwrap_or_default();
            if paths.is_empty() {
                continue;
            }
            let paths = paths
                .iter()
                .map(|path| display_path(path, repo.root()))
                .collect();
            findings.push(Finding::with_paths(definition, paths));
        }

        // Per-notebook results are kept for every notebook, findings or
        // not, so repository totals stay reconcilable.
        let notebook_results = repo
            .notebooks()
            .iter()
            .map(|notebook| NotebookLinter::new(notebook, registry, settings).into_report())
            .collect();

        let diagnostics = repo
            .skipped_notebooks()
            .iter()
            .map(|skipped| format!("skipped {}: {}", skipped.path.display(), skipped.reason))
            .collect();

        Self {
            report: RepoReport {
                generated_at: chrono::Utc::now().to_rfc3339(),
                metadata,
                stats,
                findings,
                notebook_results,
                diagnostics,
            },
        }
    }

    /// The aggregated result
    #[must_use]
    pub fn report(&self) -> &RepoReport {
        &self.report
    }

    /// Consume the linter, yielding the aggregated result
    #[must_use]
    pub fn into_report(self) -> RepoReport {
        self.report
    }
}

/// Paths are reported relative to the repository root when possible
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
