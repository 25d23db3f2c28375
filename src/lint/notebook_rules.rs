//! Built-in notebook-level and cell-level rules
//!
//! Every rule is a pure function of the notebook and the run's settings.
//! Rules that depend on the script's syntax tree report no finding when
//! the notebook's syntax is invalid; the notebook flags that condition
//! itself, so callers can tell a pass from an unanalyzable notebook.

use regex::Regex;

use crate::config::Settings;
use crate::notebook::{CellType, Notebook, segment_has_import};

use super::{LintDefinition, LintFn};

/// An H1 ATX heading: a single `#`, no embedded `#` in the title
const H1_PATTERN: &str = r"^\s*#\s*[^#\n]*$";

// ============== //
// NOTEBOOK LEVEL //
// ============== //

/// Check linear execution order of notebook cells
pub fn non_linear_execution(notebook: &Notebook, _settings: &Settings) -> bool {
    let counters: Vec<i64> = notebook
        .code_cells()
        .iter()
        .filter_map(|cell| cell.exec_count())
        .collect();
    !counters.windows(2).all(|pair| pair[0] <= pair[1])
}

/// Check if the notebook contains too many cells
pub fn notebook_too_long(notebook: &Notebook, settings: &Settings) -> bool {
    notebook.cell_count() > settings.max_cells_in_notebook
}

/// Check whether the notebook was left with the editor's default title
pub fn untitled_notebook(notebook: &Notebook, _settings: &Settings) -> bool {
    let pattern = Regex::new(r"^Untitled\d*\.ipynb$").expect("untitled pattern is valid");
    pattern.is_match(notebook.file_name())
}

/// Check whether a duplicated notebook was left with the editor's
/// default copy title
pub fn duplicate_notebook_not_renamed(notebook: &Notebook, _settings: &Settings) -> bool {
    let pattern = Regex::new(r"-Copy\d+\.ipynb$").expect("copy pattern is valid");
    pattern.is_match(notebook.file_name())
}

/// Check if the notebook filename contains characters outside
/// `[A-Za-z0-9_.-]`
pub fn non_portable_filename(notebook: &Notebook, _settings: &Settings) -> bool {
    let pattern = Regex::new(r"^[A-Za-z0-9_.-]+$").expect("charset pattern is valid");
    !pattern.is_match(notebook.file_name())
}

/// Check if the notebook filename exceeds the configured length;
/// disabled when no maximum is configured
pub fn long_filename(notebook: &Notebook, settings: &Settings) -> bool {
    settings
        .max_filename_length
        .is_some_and(|max| notebook.file_name().len() > max)
}

/// Check if import statements appear beyond the first code cell.
///
/// Cell boundaries come from the structured segment map recorded at
/// script-generation time. Inapplicable (no finding) when the script has
/// invalid syntax.
pub fn imports_beyond_first_cell(notebook: &Notebook, _settings: &Settings) -> bool {
    if notebook.has_invalid_syntax() {
        return false;
    }
    let script = notebook.script();
    script
        .spans()
        .iter()
        .skip(1)
        .any(|span| segment_has_import(&script.segment(*span)))
}

/// Check that an H1 Markdown heading appears in the initial cells
pub fn missing_h1_md_heading(notebook: &Notebook, settings: &Settings) -> bool {
    let pattern = Regex::new(H1_PATTERN).expect("h1 pattern is valid");
    let found = notebook
        .initial_cells(settings.initial_cells)
        .iter()
        .filter(|cell| cell.cell_type() == CellType::Markdown)
        .flat_map(|cell| cell.source().lines())
        .any(|line| pattern.is_match(line));
    !found
}

/// Check that descriptive Markdown text (not just headings) opens the
/// notebook
pub fn missing_opening_md_text(notebook: &Notebook, settings: &Settings) -> bool {
    !notebook
        .initial_cells(settings.initial_cells)
        .iter()
        .any(|cell| cell.cell_type() == CellType::Markdown && !cell.is_heading())
}

/// Check that descriptive Markdown text (not just headings) closes the
/// notebook
pub fn missing_closing_md_text(notebook: &Notebook, settings: &Settings) -> bool {
    !notebook
        .final_cells(settings.final_cells)
        .iter()
        .any(|cell| cell.cell_type() == CellType::Markdown && !cell.is_heading())
}

/// Check that the markdown/code cell ratio is adequate; vacuously passes
/// with zero code cells
pub fn too_few_md_cells(notebook: &Notebook, settings: &Settings) -> bool {
    let code_cells = notebook.code_cells().len();
    if code_cells == 0 {
        return false;
    }
    let ratio = notebook.markdown_cells().len() as f64 / code_cells as f64;
    ratio < settings.min_md_code_ratio
}

// ========== //
// CELL LEVEL //
// ========== //

/// Indexes of non-empty code cells that were never executed
pub fn non_executed_cells(notebook: &Notebook, _settings: &Settings) -> Vec<usize> {
    notebook
        .code_cells()
        .iter()
        .filter(|cell| cell.is_non_executed())
        .map(|cell| cell.index())
        .collect()
}

/// Indexes of empty code cells
pub fn empty_cells(notebook: &Notebook, _settings: &Settings) -> Vec<usize> {
    notebook
        .code_cells()
        .iter()
        .filter(|cell| cell.is_empty())
        .map(|cell| cell.index())
        .collect()
}

/// Indexes of code cells longer than the configured line threshold
pub fn cells_too_long(notebook: &Notebook, settings: &Settings) -> Vec<usize> {
    notebook
        .code_cells()
        .iter()
        .filter(|cell| cell.line_count() > settings.max_lines_in_code_cell)
        .map(|cell| cell.index())
        .collect()
}

/// The notebook-level and cell-level rules of the core provider
pub fn lints(settings: &Settings) -> Vec<LintDefinition> {
    let max_filename_length = settings
        .max_filename_length
        .map_or_else(|| "unset".to_string(), |max| max.to_string());

    vec![
        LintDefinition::new(
            "non-linear-execution",
            "Notebook cells have been executed in a non-linear order.",
            "Re-run your notebook top to bottom to ensure it is reproducible.",
            LintFn::Notebook(non_linear_execution),
        ),
        LintDefinition::new(
            "notebook-too-long",
            format!(
                "The notebook is too long: the total number of cells exceeds the fixed \
                 threshold ({}).",
                settings.max_cells_in_notebook
            ),
            "Split this notebook into two or more notebooks.",
            LintFn::Notebook(notebook_too_long),
        ),
        LintDefinition::new(
            "untitled-notebook",
            "The notebook still has the default title: Untitled<serial-number>.ipynb",
            "Give it a meaningful title to make it easy to recognize.",
            LintFn::Notebook(untitled_notebook),
        ),
        LintDefinition::new(
            "duplicate-notebook-not-renamed",
            "The duplicate notebook still has the default title: \
             <source-notebook-name>-Copy<copy-number>.ipynb",
            "Give it a meaningful title to make it easy to recognize.",
            LintFn::Notebook(duplicate_notebook_not_renamed),
        ),
        LintDefinition::new(
            "non-portable-chars-in-nb-name",
            "The notebook filename contains non-portable characters (i.e., characters \
             outside the [A-Za-z0-9_.-] charset).",
            "Rename your notebook by using characters contained in the following portable \
             charset: [A-Za-z0-9_.-].",
            LintFn::Notebook(non_portable_filename),
        ),
        LintDefinition::new(
            "notebook-name-too-long",
            format!(
                "The notebook filename is too long (i.e., it exceeds the fixed threshold \
                 of {max_filename_length} characters)."
            ),
            "Use a shorter filename and leverage Markdown titles to convey detailed \
             information.",
            LintFn::Notebook(long_filename),
        ),
        LintDefinition::new(
            "imports-beyond-first-cell",
            "Import statements found beyond the first cell of the notebook.",
            "Move import statements to the first code cell to make your notebook \
             dependencies more explicit.",
            LintFn::Notebook(imports_beyond_first_cell),
        ),
        LintDefinition::new(
            "missing-h1-md-heading",
            "An H1 Markdown heading is missing from the initial cells of the notebook.",
            "Clarify the notebook subject by writing an H1 Markdown heading in one of the \
             initial cells of your notebook.",
            LintFn::Notebook(missing_h1_md_heading),
        ),
        LintDefinition::new(
            "missing-opening-md-text",
            format!(
                "The initial notebook cells (i.e., the first {} cells in the notebook) \
                 contain no Markdown text.",
                settings.initial_cells
            ),
            "Begin your notebook by describing what you intend to do in one or more \
             introductory Markdown cells.",
            LintFn::Notebook(missing_opening_md_text),
        ),
        LintDefinition::new(
            "missing-closing-md-text",
            format!(
                "The final notebook cells (i.e., the last {} cells in the notebook) \
                 contain no Markdown text.",
                settings.final_cells
            ),
            "Conclude your notebook by describing what you have accomplished in one or \
             more concluding Markdown cells.",
            LintFn::Notebook(missing_closing_md_text),
        ),
        LintDefinition::new(
            "too-few-md-cells",
            format!(
                "The notebook contains too few Markdown cells compared to code cells \
                 (the ratio is below the fixed threshold of {:.0}%).",
                settings.min_md_code_ratio * 100.0
            ),
            "Describe the steps of your computation by adding a few more Markdown cells.",
            LintFn::Notebook(too_few_md_cells),
        ),
        LintDefinition::new(
            "non-executed-cells",
            "Non-executed cells are present in the notebook.",
            "Re-run your notebook top to bottom to ensure that all cells are executed.",
            LintFn::Cell(non_executed_cells),
        ),
        LintDefinition::new(
            "empty-cells",
            "Empty cells are present in the notebook.",
            "Keep your notebook clean by deleting unused cells.",
            LintFn::Cell(empty_cells),
        )
        .hide_details(),
        LintDefinition::new(
            "cell-too-long",
            format!(
                "One or more code cells in this notebook are too long (i.e., they exceed \
                 the fixed threshold of {} lines).",
                settings.max_lines_in_code_cell
            ),
            "Consider consolidating your code outside the notebook by moving utility \
             functions to a structured and tested codebase.\nUse notebooks to display \
             results, not to compute them.",
            LintFn::Cell(cells_too_long),
        ),
    ]
}
