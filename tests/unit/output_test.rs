//! Tests for the Output module
//!
//! Output provides the uniform result shapes that can be rendered as
//! either human-readable text or machine-parseable JSON.

use nblint::output::{
    CellReport, Finding, NotebookMetadata, NotebookReport, NotebookStats, OutputMode,
    RepoReport, RepositoryMetadata, RepositoryStats,
};

fn stats() -> NotebookStats {
    NotebookStats {
        number_of_cells: 3,
        number_of_md_cells: 2,
        number_of_code_cells: 1,
        number_of_raw_cells: 0,
        number_of_other_cells: 0,
        number_of_functions: 0,
        number_of_classes: 0,
        number_of_md_lines: 4,
        number_of_md_titles: 1,
    }
}

fn finding(slug: &str) -> Finding {
    Finding {
        slug: slug.to_string(),
        description: "Something is off.".to_string(),
        recommendation: "Fix it.".to_string(),
        cells: None,
        paths: None,
        show_details: true,
    }
}

fn notebook_report(findings: Vec<Finding>) -> NotebookReport {
    NotebookReport {
        metadata: NotebookMetadata {
            notebook_name: "analysis.ipynb".to_string(),
            has_invalid_syntax: false,
        },
        stats: stats(),
        findings,
    }
}

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

#[test]
fn notebook_report_serializes_camel_case() {
    let report = notebook_report(vec![finding("untitled-notebook")]);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"notebookName\":\"analysis.ipynb\""));
    assert!(json.contains("\"numberOfCells\":3"));
    assert!(json.contains("\"numberOfMdCells\":2"));
    assert!(json.contains("\"hasInvalidSyntax\":false"));
    assert!(json.contains("\"slug\":\"untitled-notebook\""));
}

#[test]
fn boolean_findings_carry_no_item_detail() {
    let json = serde_json::to_string(&finding("non-linear-execution")).unwrap();
    assert!(!json.contains("\"cells\""));
    assert!(!json.contains("\"paths\""));
}

#[test]
fn cell_detail_serializes_index_and_counter_but_not_source() {
    let mut with_cells = finding("non-executed-cells");
    with_cells.cells = Some(vec![CellReport {
        index: 4,
        cell_type: "code".to_string(),
        execution_count: None,
        excerpt: "secret_source()".to_string(),
        show_index: true,
    }]);

    let json = serde_json::to_string(&with_cells).unwrap();
    assert!(json.contains("\"index\":4"));
    assert!(json.contains("\"cellType\":\"code\""));
    assert!(!json.contains("secret_source"));
    // a null counter is omitted, not serialized as null
    assert!(!json.contains("executionCount"));
}

#[test]
fn has_findings() {
    assert!(!notebook_report(vec![]).has_findings());
    assert!(notebook_report(vec![finding("x")]).has_findings());
}

#[test]
fn repo_report_rolls_up_notebook_findings() {
    let clean = RepoReport {
        generated_at: "2024-01-01T00:00:00Z".to_string(),
        metadata: RepositoryMetadata {
            repository_name: "demo".to_string(),
        },
        stats: RepositoryStats {
            number_of_notebooks: 1,
        },
        findings: vec![],
        notebook_results: vec![notebook_report(vec![])],
        diagnostics: vec![],
    };
    assert!(!clean.has_findings());

    let with_notebook_finding = RepoReport {
        notebook_results: vec![notebook_report(vec![finding("untitled-notebook")])],
        ..clean.clone()
    };
    assert!(with_notebook_finding.has_findings());

    let with_repo_finding = RepoReport {
        findings: vec![finding("repository-not-versioned")],
        ..clean
    };
    assert!(with_repo_finding.has_findings());
}

#[test]
fn repo_report_serializes_notebook_results() {
    let report = RepoReport {
        generated_at: "2024-01-01T00:00:00Z".to_string(),
        metadata: RepositoryMetadata {
            repository_name: "demo".to_string(),
        },
        stats: RepositoryStats {
            number_of_notebooks: 1,
        },
        findings: vec![],
        notebook_results: vec![notebook_report(vec![])],
        diagnostics: vec!["skipped bad.ipynb: not json".to_string()],
    };

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"repositoryName\":\"demo\""));
    assert!(json.contains("\"numberOfNotebooks\":1"));
    assert!(json.contains("\"notebookResults\""));
    assert!(json.contains("\"diagnostics\""));
}
