//! plugin-scaffold creates Microdrop plugin projects from a template tree
//! and keeps existing plugins' hook scripts in sync with that template.
//! It also packages plugins for release and runs their post-install step.

/// Command-line interface module
pub mod cli;

/// Walks the template tree and lists the files to copy
pub mod collector;

/// Promotion of the staging directory into the output directory
pub mod committer;

/// Explicit configuration passed to every component
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Hook script reconciliation for existing plugins
pub mod hooks;

/// Built-in ignore list and `.templateignore` handling
pub mod ignore;

/// Post-install requirements installation
pub mod install;

/// Copies collected files into the staging directory
pub mod materializer;

/// Operator input for conflict resolution
pub mod prompt;

/// Release archive packaging
pub mod release;

/// Literal token substitution in copied sources
pub mod rewriter;

/// Plugin generation pipeline
pub mod scaffold;

/// Initial repository and version marker
pub mod vcs;
