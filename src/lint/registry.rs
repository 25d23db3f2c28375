//! Rule registry
//!
//! The registry is a per-run value, not a process global: it is built
//! fresh by [`load`] from the run's settings and handed to the
//! orchestrators explicitly, so repeated or concurrent runs in one process
//! cannot leak registrations into each other. Rule providers are a static
//! manifest of `(id, registration function)` pairs — the available rule
//! set is known without any runtime module resolution.

use crate::config::{ConfigError, Settings};

use super::{LintDefinition, LintFilter, LintLevel, notebook_rules, repo_rules};

/// A provider's registration function: the rules it contributes under the
/// given settings
pub type ProviderFn = fn(&Settings) -> Vec<LintDefinition>;

/// The built-in rule providers
pub const BUILTIN_PROVIDERS: &[(&str, ProviderFn)] = &[
    ("core/notebook", notebook_rules::lints),
    ("core/repository", repo_rules::lints),
];

/// The rules enabled for one run, one ordered list per granularity level
#[derive(Debug)]
pub struct LintRegistry {
    filter: LintFilter,
    cell: Vec<LintDefinition>,
    notebook: Vec<LintDefinition>,
    path: Vec<LintDefinition>,
    project: Vec<LintDefinition>,
}

impl LintRegistry {
    /// Create an empty registry with the given filter
    #[must_use]
    pub fn new(filter: LintFilter) -> Self {
        Self {
            filter,
            cell: Vec::new(),
            notebook: Vec::new(),
            path: Vec::new(),
            project: Vec::new(),
        }
    }

    /// Register rules, appending each to its level's list after applying
    /// the filter.
    ///
    /// Registration does not deduplicate by slug; callers are expected to
    /// register each provider exactly once per run.
    pub fn register(&mut self, definitions: Vec<LintDefinition>) {
        for definition in definitions {
            if !self.filter.allows(&definition.slug) {
                log::debug!("rule `{}` filtered out", definition.slug);
                continue;
            }
            match definition.level() {
                LintLevel::Cell => self.cell.push(definition),
                LintLevel::Notebook => self.notebook.push(definition),
                LintLevel::Path => self.path.push(definition),
                LintLevel::Project => self.project.push(definition),
            }
        }
    }

    /// The enabled cell-level rules, in registration order
    #[must_use]
    pub fn cell_lints(&self) -> &[LintDefinition] {
        &self.cell
    }

    /// The enabled notebook-level rules, in registration order
    #[must_use]
    pub fn notebook_lints(&self) -> &[LintDefinition] {
        &self.notebook
    }

    /// The enabled path-level rules, in registration order
    #[must_use]
    pub fn path_lints(&self) -> &[LintDefinition] {
        &self.path
    }

    /// The enabled project-level rules, in registration order
    #[must_use]
    pub fn project_lints(&self) -> &[LintDefinition] {
        &self.project
    }

    /// Every enabled rule, notebook levels first
    pub fn iter(&self) -> impl Iterator<Item = &LintDefinition> {
        self.notebook
            .iter()
            .chain(&self.cell)
            .chain(&self.project)
            .chain(&self.path)
    }

    /// Total number of enabled rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.cell.len() + self.notebook.len() + self.path.len() + self.project.len()
    }

    /// `true` when no rule is enabled
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the registry for one run: validate the settings, then register
/// the configured providers (all built-ins when none are configured).
pub fn load(settings: &Settings) -> Result<LintRegistry, ConfigError> {
    settings.validate()?;
    let mut registry = LintRegistry::new(LintFilter::from_settings(settings));

    match &settings.providers {
        None => {
            for (_, provider) in BUILTIN_PROVIDERS {
                registry.register(provider(settings));
            }
        }
        Some(ids) => {
            for id in ids {
                let provider = BUILTIN_PROVIDERS
                    .iter()
                    .find(|(name, _)| name == id)
                    .map(|(_, provider)| provider)
                    .ok_or_else(|| ConfigError::UnknownProvider(id.clone()))?;
                registry.register(provider(settings));
            }
        }
    }

    log::debug!("registry loaded with {} rule(s)", registry.len());
    Ok(registry)
}
