//! Notebook linter

use crate::config::Settings;
use crate::lint::{LintFn, LintRegistry};
use crate::notebook::{Cell, CellType, Notebook, count_definitions};
use crate::output::{CellReport, Finding, NotebookMetadata, NotebookReport, NotebookStats};

use super::run_guarded;

/// Executes every registered notebook-level and cell-level rule against
/// one notebook and aggregates the result
#[derive(Debug)]
pub struct NotebookLinter {
    report: NotebookReport,
}

impl NotebookLinter {
    /// Lint `notebook` with the rules enabled in `registry`
    #[must_use]
    pub fn new(notebook: &Notebook, registry: &LintRegistry, settings: &Settings) -> Self {
        let metadata = NotebookMetadata {
            notebook_name: notebook.display_name(),
            has_invalid_syntax: notebook.has_invalid_syntax(),
        };
        let stats = compute_stats(notebook);

        let mut findings = Vec::new();

        for definition in registry.notebook_lints() {
            let LintFn::Notebook(eval) = definition.function else {
                continue;
            };
            let fired =
                run_guarded(&definition.slug, || eval(notebook, settings)).unwrap_or(false);
            if fired {
                findings.push(Finding::flag(definition));
            }
        }

        for definition in registry.cell_lints() {
            let LintFn::Cell(eval) = definition.function else {
                continue;
            };
            let indexes =
                run_guarded(&definition.slug, || eval(notebook, settings)).unwrap_or_default();
            if indexes.is_empty() {
                continue;
            }
            let cells = indexes
                .iter()
                .filter_map(|&index| notebook.cells().get(index))
                .map(|cell| cell_report(cell, settings))
                .collect();
            findings.push(Finding::with_cells(definition, cells));
        }

        Self {
            report: NotebookReport {
                metadata,
                stats,
                findings,
            },
        }
    }

    /// The aggregated result
    #[must_use]
    pub fn report(&self) -> &NotebookReport {
        &self.report
    }

    /// Consume the linter, yielding the aggregated result
    #[must_use]
    pub fn into_report(self) -> NotebookReport {
        self.report
    }
}

fn cell_report(cell: &Cell, settings: &Settings) -> CellReport {
    CellReport {
        index: cell.index(),
        cell_type: cell.cell_type().to_string(),
        execution_count: cell.exec_count(),
        excerpt: cell.excerpt(settings.cell_rendering_mode),
        show_index: settings.display_cell_index,
    }
}

fn compute_stats(notebook: &Notebook) -> NotebookStats {
    let count_of = |cell_type: CellType| {
        notebook.cells().iter().filter(|c| c.cell_type() == cell_type).count()
    };

    let (functions, classes) = notebook
        .syntax_tree()
        .map_or((0, 0), count_definitions);

    let md_lines: usize = notebook
        .markdown_cells()
        .iter()
        .map(|cell| cell.source().lines().count())
        .sum();
    let md_titles: usize = notebook
        .markdown_cells()
        .iter()
        .flat_map(|cell| cell.source().lines())
        .filter(|line| line.trim_start().starts_with('#'))
        .count();

    NotebookStats {
        number_of_cells: notebook.cell_count(),
        number_of_md_cells: count_of(CellType::Markdown),
        number_of_code_cells: count_of(CellType::Code),
        number_of_raw_cells: count_of(CellType::Raw),
        number_of_other_cells: count_of(CellType::Other),
        number_of_functions: functions,
        number_of_classes: classes,
        number_of_md_lines: md_lines,
        number_of_md_titles: md_titles,
    }
}
