//! nblint - a static linter for Jupyter notebooks and the repositories
//! that contain them
//!
//! This library provides the lint engine: the notebook/repository data
//! model, the per-run rule registry, the built-in rule catalog, and the
//! linter orchestrators that turn a parsed notebook (or a repository of
//! notebooks) into a structured set of findings. Notebooks are never
//! executed; every rule is a pure function of the parsed model.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Pedantic lints stay warnings; a few too-noisy ones are allowed outright
#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod lint;
pub mod linter;
pub mod manifest;
pub mod notebook;
pub mod output;
pub mod paths;
pub mod repository;
