//! Tests for the NotebookLinter and RepoLinter orchestrators

use tempfile::TempDir;

use nblint::config::Settings;
use nblint::lint;
use nblint::linter::{NotebookLinter, RepoLinter};
use nblint::repository::Repository;

use crate::common::{clean_cells, code_cell, make_notebook, md_cell, write_notebook};

#[test]
fn stats_are_always_present() {
    let settings = Settings::default();
    let registry = lint::load(&settings).unwrap();

    let notebook = make_notebook(
        "analysis.ipynb",
        &[
            md_cell("# Analysis\n\nWe explore the dataset."),
            code_cell("import os\n\ndef helper():\n    return os.name", Some(1)),
            md_cell("## Results\nAll good."),
        ],
    );
    let report = NotebookLinter::new(&notebook, &registry, &settings).into_report();

    assert_eq!(report.metadata.notebook_name, "analysis.ipynb");
    assert_eq!(report.stats.number_of_cells, 3);
    assert_eq!(report.stats.number_of_md_cells, 2);
    assert_eq!(report.stats.number_of_code_cells, 1);
    assert_eq!(report.stats.number_of_raw_cells, 0);
    assert_eq!(report.stats.number_of_functions, 1);
    assert_eq!(report.stats.number_of_classes, 0);
    assert_eq!(report.stats.number_of_md_lines, 5);
    assert_eq!(report.stats.number_of_md_titles, 2);
}

#[test]
fn cell_counts_partition() {
    let settings = Settings::default();
    let registry = lint::load(&settings).unwrap();

    let notebook = make_notebook("nb.ipynb", &clean_cells());
    let report = NotebookLinter::new(&notebook, &registry, &settings).into_report();

    let stats = report.stats;
    assert_eq!(
        stats.number_of_cells,
        stats.number_of_md_cells
            + stats.number_of_code_cells
            + stats.number_of_raw_cells
            + stats.number_of_other_cells
    );
}

#[test]
fn fixture_scenario_non_executed_cell() {
    // 3 cells: one non-blank, never-executed code cell and two markdown
    // cells
    let settings = Settings::default();
    let registry = lint::load(&settings).unwrap();

    let notebook = make_notebook(
        "scenario.ipynb",
        &[
            code_cell("x = 1", None),
            md_cell("# Title\n\nSome intro."),
            md_cell("Closing words."),
        ],
    );
    let report = NotebookLinter::new(&notebook, &registry, &settings).into_report();

    assert_eq!(report.stats.number_of_cells, 3);

    let non_executed = report
        .findings
        .iter()
        .find(|f| f.slug == "non-executed-cells")
        .expect("non-executed-cells should fire");
    let indexes: Vec<usize> =
        non_executed.cells.as_ref().unwrap().iter().map(|c| c.index).collect();
    assert_eq!(indexes, vec![0]);

    assert!(report.findings.iter().all(|f| f.slug != "empty-cells"));
}

#[test]
fn clean_notebook_yields_stats_and_no_findings() {
    let settings = Settings::default();
    let registry = lint::load(&settings).unwrap();

    let notebook = make_notebook("analysis.ipynb", &clean_cells());
    let report = NotebookLinter::new(&notebook, &registry, &settings).into_report();

    assert!(!report.has_findings(), "unexpected findings: {:?}", report.findings);
    assert_eq!(report.stats.number_of_cells, 3);
}

#[test]
fn relinting_the_same_notebook_is_idempotent() {
    let settings = Settings::default();
    let registry = lint::load(&settings).unwrap();

    let notebook = make_notebook(
        "Untitled.ipynb",
        &[code_cell("x = 1", None), code_cell("", None)],
    );

    let first = NotebookLinter::new(&notebook, &registry, &settings).into_report();
    let second = NotebookLinter::new(&notebook, &registry, &settings).into_report();

    let slugs = |report: &nblint::output::NotebookReport| {
        report.findings.iter().map(|f| f.slug.clone()).collect::<Vec<_>>()
    };
    assert_eq!(slugs(&first), slugs(&second));
}

#[test]
fn invalid_syntax_is_surfaced_not_raised() {
    let settings = Settings::default();
    let registry = lint::load(&settings).unwrap();

    let notebook = make_notebook("broken.ipynb", &[code_cell("def broken(:", Some(1))]);
    let report = NotebookLinter::new(&notebook, &registry, &settings).into_report();

    assert!(report.metadata.has_invalid_syntax);
    assert_eq!(report.stats.number_of_functions, 0);
    assert!(report.findings.iter().all(|f| f.slug != "imports-beyond-first-cell"));
}

#[test]
fn repo_linter_keeps_zero_finding_notebooks() {
    let settings = Settings::default();
    let registry = lint::load(&settings).unwrap();

    let dir = TempDir::new().unwrap();
    write_notebook(dir.path(), "clean.ipynb", &clean_cells());
    write_notebook(dir.path(), "Untitled.ipynb", &clean_cells());

    let repo = Repository::scan(dir.path(), &settings).unwrap();
    let report = RepoLinter::new(&repo, &registry, &settings).into_report();

    assert_eq!(report.stats.number_of_notebooks, 2);
    assert_eq!(report.notebook_results.len(), 2);

    let clean = report
        .notebook_results
        .iter()
        .find(|r| r.metadata.notebook_name == "clean.ipynb")
        .unwrap();
    assert!(!clean.has_findings());

    let untitled = report
        .notebook_results
        .iter()
        .find(|r| r.metadata.notebook_name == "Untitled.ipynb")
        .unwrap();
    assert!(untitled.findings.iter().any(|f| f.slug == "untitled-notebook"));
}

#[test]
fn repo_linter_reports_repository_findings_and_diagnostics() {
    let settings = Settings::default();
    let registry = lint::load(&settings).unwrap();

    let dir = TempDir::new().unwrap();
    write_notebook(dir.path(), "a/Test.ipynb", &clean_cells());
    write_notebook(dir.path(), "b/Test.ipynb", &clean_cells());
    std::fs::write(dir.path().join("bad.ipynb"), "nonsense").unwrap();

    let repo = Repository::scan(dir.path(), &settings).unwrap();
    let report = RepoLinter::new(&repo, &registry, &settings).into_report();

    // no .git, no manifests
    assert!(report.findings.iter().any(|f| f.slug == "repository-not-versioned"));
    assert!(report.findings.iter().any(|f| f.slug == "dependencies-unmanaged"));

    let duplicates = report
        .findings
        .iter()
        .find(|f| f.slug == "duplicate-notebook-filename")
        .expect("duplicate filenames should fire");
    let paths = duplicates.paths.as_ref().unwrap();
    assert_eq!(paths.len(), 2);

    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].contains("bad.ipynb"));
}

#[test]
fn repo_linter_respects_rule_filters() {
    let settings = Settings {
        exclude: Some(["repository-not-versioned".to_string()].into()),
        ..Settings::default()
    };
    let registry = lint::load(&settings).unwrap();

    let dir = TempDir::new().unwrap();
    write_notebook(dir.path(), "nb.ipynb", &clean_cells());

    let repo = Repository::scan(dir.path(), &settings).unwrap();
    let report = RepoLinter::new(&repo, &registry, &settings).into_report();

    assert!(report.findings.iter().all(|f| f.slug != "repository-not-versioned"));
}
