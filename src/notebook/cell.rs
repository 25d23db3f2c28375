//! Cell model
//!
//! A [`Cell`] is the normalized representation of one notebook cell. It is
//! constructed once, when the owning notebook is parsed, and never mutated
//! afterwards. The derived predicates here are the primitives the cell-level
//! rules are built from.

use regex::Regex;
use serde::Serialize;

use crate::config::CellRenderingMode;

/// ATX heading with one to six `#` and no embedded `#` in the title
const HEADING_PATTERN: &str = r"^\s*#{1,6}\s*[^#\n]*$";

/// The type of a notebook cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// Markdown prose
    Markdown,
    /// Executable code
    Code,
    /// Raw (pass-through) content
    Raw,
    /// Any cell type the notebook format does not define
    Other,
}

impl CellType {
    /// Map the `cell_type` string of the notebook file format
    #[must_use]
    pub fn from_format(raw: &str) -> Self {
        match raw {
            "markdown" => Self::Markdown,
            "code" => Self::Code,
            "raw" => Self::Raw,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Code => write!(f, "code"),
            Self::Raw => write!(f, "raw"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// One notebook cell
#[derive(Debug, Clone)]
pub struct Cell {
    /// Position within the notebook, zero-based and stable
    index: usize,
    /// Cell type
    cell_type: CellType,
    /// Cell source text
    source: String,
    /// Execution counter; `None` means the cell was never executed
    exec_count: Option<i64>,
    /// First line of this cell's segment in the generated script
    /// (code cells only, set at notebook construction)
    pub(crate) script_line: Option<usize>,
}

impl Cell {
    /// Create a cell. The execution counter is kept for code cells only;
    /// the notebook format leaves it undefined for the other types.
    #[must_use]
    pub fn new(index: usize, cell_type: CellType, source: String, exec_count: Option<i64>) -> Self {
        let exec_count = match cell_type {
            CellType::Code => exec_count,
            _ => None,
        };
        Self {
            index,
            cell_type,
            source,
            exec_count,
            script_line: None,
        }
    }

    /// Position of this cell within its notebook
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell type
    #[must_use]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// The raw cell source
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The execution counter; `None` is semantically "never executed",
    /// not "executed zero times"
    #[must_use]
    pub fn exec_count(&self) -> Option<i64> {
        self.exec_count
    }

    /// First line of this cell's segment in the generated script
    #[must_use]
    pub fn script_line(&self) -> Option<usize> {
        self.script_line
    }

    /// Number of source lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.source.split('\n').count()
    }

    /// `true` if this is a code cell that was never executed and has a
    /// blank source. Defined for code cells; always `false` otherwise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell_type == CellType::Code
            && self.exec_count.is_none()
            && self.source.trim().is_empty()
    }

    /// `true` if this is a non-blank code cell that was never executed.
    /// Defined for code cells; always `false` otherwise.
    ///
    /// Together with [`Cell::is_empty`] this partitions un-executed code
    /// cells: the two predicates are mutually exclusive, and both are
    /// `false` whenever the execution counter is present.
    #[must_use]
    pub fn is_non_executed(&self) -> bool {
        self.cell_type == CellType::Code
            && self.exec_count.is_none()
            && !self.source.trim().is_empty()
    }

    /// `true` if this is a markdown cell whose every non-blank line is a
    /// Markdown ATX heading. Always `false` for non-markdown cells.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        if self.cell_type != CellType::Markdown {
            return false;
        }
        let pattern = Regex::new(HEADING_PATTERN).expect("heading pattern is valid");
        self.source
            .lines()
            .filter(|line| !line.trim().is_empty())
            .all(|line| pattern.is_match(line))
    }

    /// Source excerpt for rendering: the full source, or first line,
    /// `[...]`, last line when compact and longer than two lines
    #[must_use]
    pub fn excerpt(&self, mode: CellRenderingMode) -> String {
        match mode {
            CellRenderingMode::Full => self.source.clone(),
            CellRenderingMode::Compact => {
                let lines: Vec<&str> = self.source.split('\n').collect();
                if lines.len() > 2 {
                    format!("{}\n[...]\n{}", lines[0], lines[lines.len() - 1])
                } else {
                    self.source.clone()
                }
            }
        }
    }
}
