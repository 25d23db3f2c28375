//! nblint - a static linter for Jupyter notebooks and the repositories
//! that contain them
//!
//! The binary wires the lint engine to a terminal: it loads the run's
//! configuration, builds the rule registry, lints the requested notebook
//! or repository, and renders the result as text or JSON.

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
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod cli;
mod commands;

/// Exit code for fatal errors (invalid source, bad configuration)
const EXIT_FATAL: i32 = 2;

/// Main entry point for the nblint CLI
fn main() {
    let code = match cli::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_FATAL
        }
    };
    std::process::exit(code);
}
