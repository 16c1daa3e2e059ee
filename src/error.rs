//! Error handling for the plugin scaffolder.
//! Defines the crate-wide error type, its process exit codes and the
//! diagnostic block printed when the package installer fails.

use std::io;
use thiserror::Error;

/// Width used when wrapping installer output in the diagnostic block.
const DIAGNOSTIC_WIDTH: usize = 70;

/// Custom error types for scaffolder operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The output directory name is not a valid Python module name.
    #[error("Invalid plugin name, \"{name}\".  Name must be valid Python module name.")]
    InvalidName { name: String },

    /// The output directory exists and overwriting was not authorized.
    #[error("Output directory '{output_dir}' already exists.  Use `-f` to overwrite.")]
    AlreadyExists { output_dir: String },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Errors raised while walking a directory tree.
    #[error("Failed to walk directory: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    /// Invalid ignore or rewrite pattern.
    #[error("Invalid pattern: {0}.")]
    GlobError(#[from] globset::Error),

    /// Errors reported by libgit2.
    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    /// Repository initialization failed. Never fatal for scaffolding.
    #[error("Error initializing git repo: {0}.")]
    VersionControlFailure(String),

    /// The external package installer reported a failure.
    #[error("{}", format_installer_failure(.plugin, .message))]
    InstallerFailure { plugin: String, message: String },

    /// Operator input could not be read.
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Release metadata could not be serialized.
    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// Packaging could not proceed.
    #[error("Release error: {0}.")]
    ReleaseError(String),
}

impl Error {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::AlreadyExists { .. } => 5,
            Error::InvalidName { .. } => 10,
            Error::InstallerFailure { .. } => 2,
            _ => 1,
        }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Renders the multi-line block shown when the installer fails.
///
/// Every line of `message` is wrapped at 70 columns, indented by two
/// spaces and by four on continuation lines. Words are never split.
pub fn format_installer_failure(plugin: &str, message: &str) -> String {
    let header = format!("# Error in post-install processing for: {plugin} #");
    let hbar = "-".repeat(header.chars().count());

    let body = message
        .lines()
        .map(|line| fill(line, DIAGNOSTIC_WIDTH, "  ", "    "))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{hbar}\n{header}\n\n{body}\n{hbar}")
}

fn fill(line: &str, width: usize, initial_indent: &str, subsequent_indent: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::from(initial_indent);
    let mut indent_width = initial_indent.chars().count();
    let mut current_width = indent_width;
    let mut rest = line;

    loop {
        let word_start = rest.len() - rest.trim_start().len();
        let (gap, after) = rest.split_at(word_start);
        let word_end = after.find(char::is_whitespace).unwrap_or(after.len());
        let (word, tail) = after.split_at(word_end);
        rest = tail;
        if word.is_empty() {
            break;
        }

        let word_width = word.chars().count();
        let gap_width = gap.chars().count();
        let at_line_start = current_width == indent_width;
        if !at_line_start && current_width + gap_width + word_width > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(subsequent_indent);
            indent_width = subsequent_indent.chars().count();
            current_width = indent_width;
        } else if !at_line_start || lines.is_empty() {
            // Whitespace between words is kept; only wrapped lines drop it.
            current.push_str(gap);
            current_width += gap_width;
        }
        current.push_str(word);
        current_width += word_width;
    }
    if current_width > indent_width {
        lines.push(current);
    }
    lines.join("\n")
}

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with [`Error::exit_code`].
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(err.exit_code());
}
