//! Output formatting for human and JSON modes
//!
//! This module provides the uniform result shapes produced by the linter
//! orchestrators, renderable either as human-readable text or as
//! machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::lint::LintDefinition;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Identity of a linted notebook
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookMetadata {
    /// Display name: path relative to the owning repository when owned,
    /// raw path otherwise
    pub notebook_name: String,
    /// `true` when the generated script did not parse; syntax-dependent
    /// rules were inapplicable rather than passed
    pub has_invalid_syntax: bool,
}

/// Structural statistics of one notebook
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookStats {
    /// Total number of cells
    pub number_of_cells: usize,
    /// Number of markdown cells
    pub number_of_md_cells: usize,
    /// Number of code cells
    pub number_of_code_cells: usize,
    /// Number of raw cells
    pub number_of_raw_cells: usize,
    /// Number of cells of any other type
    pub number_of_other_cells: usize,
    /// Top-level function definitions in the generated script
    pub number_of_functions: usize,
    /// Top-level class definitions in the generated script
    pub number_of_classes: usize,
    /// Total markdown source lines
    pub number_of_md_lines: usize,
    /// Markdown lines that are headings
    pub number_of_md_titles: usize,
}

/// One affected cell within a cell-level finding
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellReport {
    /// Position of the cell within its notebook
    pub index: usize,
    /// Cell type name
    pub cell_type: String,
    /// Execution counter, when the cell has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<i64>,
    /// Source excerpt, used by human rendering only
    #[serde(skip)]
    pub excerpt: String,
    /// Whether human rendering labels the cell with its index
    #[serde(skip)]
    pub show_index: bool,
}

/// One fired lint rule
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Stable rule identifier
    pub slug: String,
    /// What the rule flags
    pub description: String,
    /// How to fix it
    pub recommendation: String,
    /// Affected cells (cell-level rules only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<CellReport>>,
    /// Affected paths (path-level rules only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
    /// Whether affected-item detail is rendered in human output
    #[serde(skip)]
    pub show_details: bool,
}

impl Finding {
    /// A boolean finding: the rule fired, there is no item detail
    #[must_use]
    pub fn flag(definition: &LintDefinition) -> Self {
        Self {
            slug: definition.slug.clone(),
            description: definition.description.clone(),
            recommendation: definition.recommendation.clone(),
            cells: None,
            paths: None,
            show_details: definition.show_details,
        }
    }

    /// A cell-level finding with its affected cells
    #[must_use]
    pub fn with_cells(definition: &LintDefinition, cells: Vec<CellReport>) -> Self {
        Self {
            cells: Some(cells),
            ..Self::flag(definition)
        }
    }

    /// A path-level finding with its affected paths
    #[must_use]
    pub fn with_paths(definition: &LintDefinition, paths: Vec<String>) -> Self {
        Self {
            paths: Some(paths),
            ..Self::flag(definition)
        }
    }

    fn render_human(&self, slug_color: SlugColor) {
        let slug = format!("({})", self.slug);
        match slug_color {
            SlugColor::Notebook => println!("  {}", slug.yellow().bold()),
            SlugColor::Repository => println!("  {}", slug.blue().bold()),
        }
        println!("      {}", self.description);
        if !self.recommendation.is_empty() {
            println!("      {}: {}", "Recommendation".bold().underline(), self.recommendation);
        }

        if let Some(cells) = &self.cells {
            let indexes: Vec<usize> = cells.iter().map(|c| c.index).collect();
            println!("      {}: {:?}", "Affected cells".bold().underline(), indexes);
            if self.show_details {
                for cell in cells {
                    let counter = cell
                        .execution_count
                        .map_or_else(|| " ".to_string(), |c| c.to_string());
                    if cell.show_index {
                        println!("        In [{counter}] (cell {}):", cell.index);
                    } else {
                        println!("        In [{counter}]:");
                    }
                    for line in cell.excerpt.lines() {
                        println!("          {line}");
                    }
                }
            }
        }

        if let Some(paths) = &self.paths {
            println!("      {}:", "Affected paths".bold().underline());
            for path in paths {
                println!("        - {}", path.yellow());
            }
        }
        println!();
    }
}

/// Which color family a finding's slug is rendered in
#[derive(Debug, Clone, Copy)]
enum SlugColor {
    Notebook,
    Repository,
}

/// Linting result for a single notebook
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookReport {
    /// Notebook identity
    pub metadata: NotebookMetadata,
    /// Structural statistics (always present, even with zero findings)
    pub stats: NotebookStats,
    /// Fired rules, in registration order
    pub findings: Vec<Finding>,
}

impl NotebookReport {
    /// `true` when at least one rule fired
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        println!("{} {}", "Notebook:".bold(), self.metadata.notebook_name);
        let stats = &self.stats;
        println!(
            "  cells: {} | markdown: {} | code: {} | raw: {}",
            stats.number_of_cells,
            stats.number_of_md_cells,
            stats.number_of_code_cells,
            stats.number_of_raw_cells,
        );
        println!(
            "  functions: {} | classes: {} | markdown lines: {} | markdown titles: {}",
            stats.number_of_functions,
            stats.number_of_classes,
            stats.number_of_md_lines,
            stats.number_of_md_titles,
        );
        if self.metadata.has_invalid_syntax {
            println!(
                "  {}",
                "warning: the notebook script has invalid Python syntax; \
                 syntax-dependent rules were skipped"
                    .red()
            );
        }
        println!();

        if self.findings.is_empty() {
            println!("No lint findings.");
            return;
        }

        println!("{}", "Findings:".bold());
        println!();
        for finding in &self.findings {
            finding.render_human(SlugColor::Notebook);
        }
    }
}

/// Identity of a linted repository
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryMetadata {
    /// The repository root directory's name
    pub repository_name: String,
}

/// Structural statistics of one repository
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    /// Number of notebooks discovered
    pub number_of_notebooks: usize,
}

/// Linting result for a repository of notebooks
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoReport {
    /// When this report was produced (RFC 3339)
    pub generated_at: String,
    /// Repository identity
    pub metadata: RepositoryMetadata,
    /// Repository statistics
    pub stats: RepositoryStats,
    /// Fired repository-level rules, in registration order
    pub findings: Vec<Finding>,
    /// Per-notebook results, including notebooks with zero findings
    pub notebook_results: Vec<NotebookReport>,
    /// Items that could not be analyzed (e.g., unparseable notebooks)
    pub diagnostics: Vec<String>,
}

impl RepoReport {
    /// `true` when a repository-level or any per-notebook rule fired
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty() || self.notebook_results.iter().any(NotebookReport::has_findings)
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        println!("{} {}", "Repository:".bold(), self.metadata.repository_name);
        println!("  notebooks: {}", self.stats.number_of_notebooks);
        println!();

        for diagnostic in &self.diagnostics {
            println!("  {} {}", "!".red().bold(), diagnostic);
        }
        if !self.diagnostics.is_empty() {
            println!();
        }

        if self.findings.is_empty() {
            println!("No repository-level findings.");
            println!();
        } else {
            println!("{}", "Repository findings:".bold());
            println!();
            for finding in &self.findings {
                finding.render_human(SlugColor::Repository);
            }
        }

        for report in &self.notebook_results {
            println!("{}", "-".repeat(60));
            report.render_human();
        }
    }
}

/// One registered rule, as listed by `nblint rules`
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    /// Stable rule identifier
    pub slug: String,
    /// Granularity level name
    pub level: String,
    /// What the rule flags
    pub description: String,
    /// How to fix it
    pub recommendation: String,
}

/// The list of rules active under the current configuration
#[derive(Debug, Clone, Serialize)]
pub struct RulesReport {
    /// Active rules, in registration order
    pub rules: Vec<RuleInfo>,
}

impl RulesReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        if self.rules.is_empty() {
            println!("No rules enabled.");
            return;
        }

        println!("Active rules:\n");
        for rule in &self.rules {
            println!("  [{}] {}", rule.level.to_uppercase(), rule.slug.bold());
            println!("  {}\n", rule.description);
        }
        println!("{} rule(s) enabled.", self.rules.len());
    }
}

fn render_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}
