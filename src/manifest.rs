//! Dependency-manifest parsing
//!
//! Every parser here answers one question: which package names does this
//! manifest declare? Version specifiers are split off; only names are kept.
//! A malformed manifest is reported as [`ManifestError`]; the repository
//! model downgrades that to an empty contribution plus a warning instead of
//! aborting the scan.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use rustpython_parser::ast::{Constant, Expr, Stmt};
use thiserror::Error;

use crate::notebook;

/// Recognized dependency-declaration filenames
pub const MANIFEST_FILENAMES: &[&str] = &[
    "requirements.txt",
    "environment.yml",
    "environment.yaml",
    "pyproject.toml",
    "setup.py",
    "Pipfile",
];

/// `true` if `file_name` is a recognized dependency manifest
#[must_use]
pub fn is_manifest(file_name: &str) -> bool {
    MANIFEST_FILENAMES.contains(&file_name)
}

/// Errors raised while parsing a dependency manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read
    #[error("cannot read manifest {}: {source}", path.display())]
    Read {
        /// Path of the unreadable manifest
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A TOML manifest has invalid syntax
    #[error("invalid toml in {}", .0.display())]
    InvalidToml(PathBuf),

    /// A YAML manifest has invalid syntax
    #[error("invalid yaml in {}", .0.display())]
    InvalidYaml(PathBuf),

    /// A `setup.py` has invalid Python syntax
    #[error("invalid python in {}", .0.display())]
    InvalidPython(PathBuf),
}

/// Parse one manifest file and return the set of declared package names.
///
/// Dispatches on the filename; unrecognized filenames yield an empty set.
pub fn declared_packages(path: &Path) -> Result<BTreeSet<String>, ManifestError> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match file_name {
        "requirements.txt" => Ok(from_requirements_txt(&content)),
        "environment.yml" | "environment.yaml" => from_environment_yaml(&content, path),
        "pyproject.toml" => from_pyproject(&content, path),
        "Pipfile" => from_pipfile(&content, path),
        "setup.py" => from_setup_py(&content, path),
        _ => Ok(BTreeSet::new()),
    }
}

/// Split a requirement specifier like `pandas>=1.4` down to its name
fn specifier_name(requirement: &str) -> String {
    let splitter = Regex::new(r"[><=~!]=|[><]").expect("specifier pattern is valid");
    let name = splitter
        .split(requirement)
        .next()
        .unwrap_or(requirement)
        .trim();
    name.to_string()
}

fn from_requirements_txt(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(specifier_name)
        .filter(|name| !name.is_empty())
        .collect()
}

fn from_environment_yaml(content: &str, path: &Path) -> Result<BTreeSet<String>, ManifestError> {
    let parsed: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|_| ManifestError::InvalidYaml(path.to_path_buf()))?;

    let mut packages = BTreeSet::new();
    let Some(dependencies) = parsed.get("dependencies").and_then(|d| d.as_sequence()) else {
        return Ok(packages);
    };

    for item in dependencies {
        if let Some(requirement) = item.as_str() {
            // conda specifiers also allow a single `=`
            let name = specifier_name(requirement);
            let name = name.split('=').next().unwrap_or(&name).trim().to_string();
            if !name.is_empty() {
                packages.insert(name);
            }
        } else if let Some(pip) = item.get("pip").and_then(|p| p.as_sequence()) {
            for requirement in pip.iter().filter_map(|r| r.as_str()) {
                let name = specifier_name(requirement);
                if !name.is_empty() {
                    packages.insert(name);
                }
            }
        }
    }

    Ok(packages)
}

fn from_pyproject(content: &str, path: &Path) -> Result<BTreeSet<String>, ManifestError> {
    let parsed: toml::Value =
        toml::from_str(content).map_err(|_| ManifestError::InvalidToml(path.to_path_buf()))?;

    let mut packages = BTreeSet::new();

    // poetry layout: [tool.poetry.dependencies] name = version
    if let Some(dependencies) = parsed
        .get("tool")
        .and_then(|t| t.get("poetry"))
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_table())
    {
        packages.extend(dependencies.keys().cloned());
    }

    // PEP 621 layout: [project] dependencies = ["name>=1.0", ...]
    if let Some(dependencies) = parsed
        .get("project")
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_array())
    {
        for requirement in dependencies.iter().filter_map(|r| r.as_str()) {
            let name = specifier_name(requirement);
            if !name.is_empty() {
                packages.insert(name);
            }
        }
    }

    Ok(packages)
}

fn from_pipfile(content: &str, path: &Path) -> Result<BTreeSet<String>, ManifestError> {
    let parsed: toml::Value =
        toml::from_str(content).map_err(|_| ManifestError::InvalidToml(path.to_path_buf()))?;

    let mut packages = BTreeSet::new();
    if let Some(table) = parsed.get("packages").and_then(|p| p.as_table()) {
        packages.extend(table.keys().cloned());
    }
    Ok(packages)
}

/// Read `install_requires` out of the `setup(...)` call of a `setup.py`
fn from_setup_py(content: &str, path: &Path) -> Result<BTreeSet<String>, ManifestError> {
    let Some(body) = notebook::parse_module(content) else {
        return Err(ManifestError::InvalidPython(path.to_path_buf()));
    };

    let mut packages = BTreeSet::new();
    collect_install_requires(&body, &mut packages);
    Ok(packages)
}

fn collect_install_requires(stmts: &[Stmt], packages: &mut BTreeSet<String>) {
    for stmt in stmts {
        match stmt {
            Stmt::Expr(expr_stmt) => {
                if let Expr::Call(call) = expr_stmt.value.as_ref() {
                    let is_setup = matches!(
                        call.func.as_ref(),
                        Expr::Name(name) if name.id.as_str() == "setup"
                    );
                    if !is_setup {
                        continue;
                    }
                    for keyword in &call.keywords {
                        let is_requires = keyword
                            .arg
                            .as_ref()
                            .is_some_and(|arg| arg.as_str() == "install_requires");
                        if !is_requires {
                            continue;
                        }
                        if let Expr::List(list) = &keyword.value {
                            for element in &list.elts {
                                let Expr::Constant(constant) = element else {
                                    continue;
                                };
                                let Constant::Str(requirement) = &constant.value else {
                                    continue;
                                };
                                let name = specifier_name(requirement);
                                if !name.is_empty() {
                                    packages.insert(name);
                                }
                            }
                        }
                    }
                }
            }
            Stmt::If(s) => {
                collect_install_requires(&s.body, packages);
                collect_install_requires(&s.orelse, packages);
            }
            _ => {}
        }
    }
}
