//! Plugin generation: stage the template, customize it, then promote it.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;

use crate::collector::collect_files;
use crate::committer::{commit, ensure_output_dir, StagingDir};
use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};
use crate::ignore::build_ignore_set;
use crate::materializer::{materialize, rename_marker};
use crate::rewriter::rewrite_tokens;
use crate::vcs::record_initial_version;

/// Output directory names must be valid Python module names.
static PLUGIN_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w+$").expect("plugin name pattern is valid"));

/// Options for [`create_plugin`].
#[derive(Debug, Clone, Copy)]
pub struct CreateOptions {
    /// Replace the contents of an existing output directory.
    pub overwrite: bool,
    /// Initialize a tagged git repository in the new plugin.
    pub init_git: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self { overwrite: false, init_git: true }
    }
}

/// Checks that `name` starts with a letter or underscore followed by word
/// characters.
pub fn validate_plugin_name(name: &str) -> Result<()> {
    if PLUGIN_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidName { name: name.to_string() })
    }
}

/// Token written in place of the template placeholder for `plugin_name`.
pub fn plugin_token(plugin_name: &str) -> String {
    plugin_name.replace('_', "-")
}

fn absolute<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Generates a new plugin at `output_dir` from the configured template.
///
/// The name check and the existence check run before anything is written.
/// All work happens in a staging directory that is removed on every exit
/// path; `output_dir` only ever receives a complete tree.
///
/// # Errors
/// * [`Error::InvalidName`] if the directory name is not a module name
/// * [`Error::AlreadyExists`] if `output_dir` exists and overwrite is off
/// * [`Error::IoError`] and friends if staging fails
pub fn create_plugin<P: AsRef<Path>>(
    config: &ScaffoldConfig,
    output_dir: P,
    options: CreateOptions,
) -> Result<PathBuf> {
    let output_dir = absolute(output_dir)?;
    let name = output_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    validate_plugin_name(&name)?;
    ensure_output_dir(&output_dir, options.overwrite)?;

    let ignore = build_ignore_set(&config.template_dir, &config.ignore)?;
    let staging = StagingDir::beside(&output_dir)?;

    let files = collect_files(&config.template_dir, &ignore)?;
    debug!("Collected {} template files", files.len());
    materialize(&config.template_dir, &files, staging.path())?;
    rename_marker(staging.path(), &config.marker_file, &config.marker_suffix)?;

    let rewritten = rewrite_tokens(
        staging.path(),
        &config.rewrite_glob,
        &config.token,
        &plugin_token(&name),
        &config.rewrite_exclude,
    )?;
    debug!("Rewrote {} files", rewritten.len());

    record_initial_version(staging.path(), config, options.init_git)?;

    let output_dir = commit(staging.path(), &output_dir, options.overwrite)?;
    info!("Created plugin '{}'", name);
    Ok(output_dir)
}
