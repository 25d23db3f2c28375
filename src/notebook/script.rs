//! Script view of a notebook
//!
//! Code cells are concatenated into one Python script so that rules can
//! reason about the notebook as a program. The conversion records one
//! [`CellSpan`] per code cell, so segment boundaries are structured data
//! rather than textual markers re-parsed from the script. IPython magic
//! lines (`%`-prefixed) are stripped before conversion; they are not valid
//! Python and would poison the syntax tree.

use std::collections::BTreeSet;

use rustpython_parser::ast::{ExceptHandler, Stmt, Suite};
use rustpython_parser::{Mode, parse};

/// Line span of one code cell within the generated script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    /// Index of the originating cell in the notebook
    pub cell_index: usize,
    /// First script line of the segment, zero-based
    pub start_line: usize,
    /// Number of lines in the segment
    pub line_count: usize,
}

/// The generated script plus the per-cell segment map
#[derive(Debug, Clone, Default)]
pub struct Script {
    text: String,
    spans: Vec<CellSpan>,
}

impl Script {
    /// Build the script from `(cell_index, source)` pairs of the
    /// notebook's code cells, in cell order
    #[must_use]
    pub fn from_code_cells(cells: &[(usize, String)]) -> Self {
        let mut text = String::new();
        let mut spans = Vec::with_capacity(cells.len());
        let mut line = 0;

        for (cell_index, source) in cells {
            let segment: Vec<&str> =
                source.split('\n').filter(|l| !l.starts_with('%')).collect();
            let line_count = segment.len();
            spans.push(CellSpan {
                cell_index: *cell_index,
                start_line: line,
                line_count,
            });
            for l in &segment {
                text.push_str(l);
                text.push('\n');
            }
            text.push('\n');
            line += line_count + 1;
        }

        Self { text, spans }
    }

    /// The full script text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Per-cell segments, in cell order
    #[must_use]
    pub fn spans(&self) -> &[CellSpan] {
        &self.spans
    }

    /// The script lines of one segment
    #[must_use]
    pub fn segment(&self, span: CellSpan) -> String {
        self.text
            .split('\n')
            .skip(span.start_line)
            .take(span.line_count)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse a script as a Python module, returning its statement list or
/// `None` when the source is not valid Python
#[must_use]
pub fn parse_module(source: &str) -> Option<Suite> {
    match parse(source, Mode::Module, "<notebook>") {
        Ok(rustpython_parser::ast::Mod::Module(module)) => Some(module.body),
        Ok(_) => None,
        Err(err) => {
            log::debug!("script does not parse as Python: {err}");
            None
        }
    }
}

/// `true` if the segment contains an import statement at its top level
#[must_use]
pub fn segment_has_import(segment: &str) -> bool {
    parse_module(segment).is_some_and(|body| {
        body.iter().any(|stmt| matches!(stmt, Stmt::Import(_) | Stmt::ImportFrom(_)))
    })
}

/// Number of top-level function and class definitions, as
/// `(functions, classes)`
#[must_use]
pub fn count_definitions(body: &Suite) -> (usize, usize) {
    let functions = body
        .iter()
        .filter(|stmt| matches!(stmt, Stmt::FunctionDef(_) | Stmt::AsyncFunctionDef(_)))
        .count();
    let classes = body.iter().filter(|stmt| matches!(stmt, Stmt::ClassDef(_))).count();
    (functions, classes)
}

/// The set of top-level package names imported anywhere in the module.
///
/// Relative imports refer to the current package and are skipped.
#[must_use]
pub fn imported_packages(body: &Suite) -> BTreeSet<String> {
    let mut packages = BTreeSet::new();
    collect_imports(body, &mut packages);
    packages
}

fn collect_imports(stmts: &[Stmt], packages: &mut BTreeSet<String>) {
    for stmt in stmts {
        match stmt {
            Stmt::Import(import) => {
                for alias in &import.names {
                    insert_root_package(alias.name.as_str(), packages);
                }
            }
            Stmt::ImportFrom(import) => {
                let level = import.level.as_ref().map_or(0, |l| l.to_u32());
                if let Some(module) = import.module.as_ref().filter(|_| level == 0) {
                    insert_root_package(module.as_str(), packages);
                }
            }
            Stmt::FunctionDef(def) => collect_imports(&def.body, packages),
            Stmt::AsyncFunctionDef(def) => collect_imports(&def.body, packages),
            Stmt::ClassDef(def) => collect_imports(&def.body, packages),
            Stmt::If(s) => {
                collect_imports(&s.body, packages);
                collect_imports(&s.orelse, packages);
            }
            Stmt::For(s) => {
                collect_imports(&s.body, packages);
                collect_imports(&s.orelse, packages);
            }
            Stmt::AsyncFor(s) => {
                collect_imports(&s.body, packages);
                collect_imports(&s.orelse, packages);
            }
            Stmt::While(s) => {
                collect_imports(&s.body, packages);
                collect_imports(&s.orelse, packages);
            }
            Stmt::With(s) => collect_imports(&s.body, packages),
            Stmt::AsyncWith(s) => collect_imports(&s.body, packages),
            Stmt::Try(s) => {
                collect_imports(&s.body, packages);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    collect_imports(&h.body, packages);
                }
                collect_imports(&s.orelse, packages);
                collect_imports(&s.finalbody, packages);
            }
            _ => {}
        }
    }
}

fn insert_root_package(name: &str, packages: &mut BTreeSet<String>) {
    let root = name.split('.').next().unwrap_or(name);
    packages.insert(root.to_string());
}
