//! Rule definitions
//!
//! A lint rule is a record: slug, human description, remediation text, and
//! a typed evaluation function. The four granularity levels are a tagged
//! union over function signatures rather than a trait hierarchy — rules
//! stay plain data, and the level of a rule is derived from the variant it
//! carries.

pub mod registry;

pub mod notebook_rules;
pub mod repo_rules;

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::Settings;
use crate::notebook::Notebook;
use crate::repository::Repository;

pub use registry::{BUILTIN_PROVIDERS, LintRegistry, ProviderFn, load};

/// Rule granularity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintLevel {
    /// Flags individual cells of one notebook
    Cell,
    /// Flags one notebook as a whole
    Notebook,
    /// Flags individual paths of one repository
    Path,
    /// Flags one repository as a whole
    Project,
}

impl std::fmt::Display for LintLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cell => write!(f, "cell"),
            Self::Notebook => write!(f, "notebook"),
            Self::Path => write!(f, "path"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// Notebook-level evaluation: violation present or absent
pub type NotebookRuleFn = fn(&Notebook, &Settings) -> bool;

/// Cell-level evaluation: indexes of the affected cells
pub type CellRuleFn = fn(&Notebook, &Settings) -> Vec<usize>;

/// Project-level evaluation: violation present or absent
pub type ProjectRuleFn = fn(&Repository, &Settings) -> bool;

/// Path-level evaluation: the affected paths
pub type PathRuleFn = fn(&Repository, &Settings) -> Vec<PathBuf>;

/// The typed evaluation function of a rule
#[derive(Debug, Clone, Copy)]
pub enum LintFn {
    /// A notebook-level rule
    Notebook(NotebookRuleFn),
    /// A cell-level rule
    Cell(CellRuleFn),
    /// A project-level rule
    Project(ProjectRuleFn),
    /// A path-level rule
    Path(PathRuleFn),
}

/// One lint rule
#[derive(Debug, Clone)]
pub struct LintDefinition {
    /// Stable unique identifier
    pub slug: String,
    /// What the rule flags
    pub description: String,
    /// How to fix it
    pub recommendation: String,
    /// Whether affected-item detail is rendered in human output
    pub show_details: bool,
    /// The evaluation function
    pub function: LintFn,
}

impl LintDefinition {
    /// Create a rule definition with detail rendering enabled
    #[must_use]
    pub fn new(
        slug: impl Into<String>,
        description: impl Into<String>,
        recommendation: impl Into<String>,
        function: LintFn,
    ) -> Self {
        Self {
            slug: slug.into(),
            description: description.into(),
            recommendation: recommendation.into(),
            show_details: true,
            function,
        }
    }

    /// Disable affected-item detail rendering for this rule
    #[must_use]
    pub fn hide_details(mut self) -> Self {
        self.show_details = false;
        self
    }

    /// The granularity level, derived from the evaluation function
    #[must_use]
    pub fn level(&self) -> LintLevel {
        match self.function {
            LintFn::Notebook(_) => LintLevel::Notebook,
            LintFn::Cell(_) => LintLevel::Cell,
            LintFn::Project(_) => LintLevel::Project,
            LintFn::Path(_) => LintLevel::Path,
        }
    }
}

/// Include/exclude rule filter applied at registration time.
///
/// [`Settings::validate`] rejects a configuration carrying both sets, so at
/// most one of the two variants beyond [`LintFilter::All`] can be built
/// from a validated configuration.
#[derive(Debug, Clone)]
pub enum LintFilter {
    /// Keep every rule
    All,
    /// Keep only rules whose slug is in the set
    Include(BTreeSet<String>),
    /// Drop rules whose slug is in the set
    Exclude(BTreeSet<String>),
}

impl LintFilter {
    /// Derive the filter from validated settings
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        if let Some(include) = settings.include.as_ref().filter(|set| !set.is_empty()) {
            return Self::Include(include.clone());
        }
        if let Some(exclude) = settings.exclude.as_ref().filter(|set| !set.is_empty()) {
            return Self::Exclude(exclude.clone());
        }
        Self::All
    }

    /// `true` if a rule with this slug passes the filter
    #[must_use]
    pub fn allows(&self, slug: &str) -> bool {
        match self {
            Self::All => true,
            Self::Include(set) => set.contains(slug),
            Self::Exclude(set) => !set.contains(slug),
        }
    }
}
