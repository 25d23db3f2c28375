//! Command implementations

mod github;
mod notebook;
mod repo;
mod rules;

pub use github::github;
pub use notebook::notebook;
pub use repo::repo;
pub use rules::rules;

/// Exit code when no rule fired
pub const EXIT_CLEAN: i32 = 0;

/// Exit code when at least one rule fired (usable as a CI gate)
pub const EXIT_FINDINGS: i32 = 1;
