//! Synchronizes an existing plugin's hook scripts with the template.
//!
//! Each hook is compared against the template copy. Identical files are
//! left alone and missing ones are written. A differing file is only
//! replaced after the operator picks a resolution, unless overwriting was
//! authorized up front or chosen with "overwrite all" earlier in the run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;

use crate::constants::BACKUP_TIMESTAMP_FORMAT;
use crate::error::Result;
use crate::prompt::ResponseSource;

/// Operator answer to a hook conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResponse {
    Skip,
    SkipAll,
    Backup,
    Overwrite,
    OverwriteAll,
}

impl ConflictResponse {
    /// Parses an answer. An empty answer means [`ConflictResponse::Skip`];
    /// anything unrecognized yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "" | "s" | "skip" => Some(Self::Skip),
            "k" | "skip all" | "skip-all" => Some(Self::SkipAll),
            "b" | "backup" => Some(Self::Backup),
            "o" | "overwrite" => Some(Self::Overwrite),
            "a" | "overwrite all" | "overwrite-all" => Some(Self::OverwriteAll),
            _ => None,
        }
    }
}

/// What happened to a single hook file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Destination already matched the template.
    Identical,
    /// Destination was missing and has been written.
    Created,
    /// Destination differs and was left untouched.
    Skipped,
    /// Destination was saved to `backup`, then replaced.
    BackedUp { backup: PathBuf },
    /// Destination was replaced.
    Overwritten,
}

/// Result of one reconciliation run.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Outcome per processed hook, in processing order.
    pub outcomes: Vec<(PathBuf, HookOutcome)>,
    /// Set when "skip all" ended the run before every hook was processed.
    pub stopped_early: bool,
}

/// Prompt shown when `path` differs from the template.
pub fn conflict_prompt(path: &Path) -> String {
    format!(
        "File exists: {}. [(s)kip]/s(k)ip all/(b)ackup/(o)verwrite/overwrite (a)ll?",
        path.display()
    )
}

/// Sibling of `path` whose name carries the `now` timestamp.
pub fn backup_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}", now.format(BACKUP_TIMESTAMP_FORMAT)));
    path.with_file_name(name)
}

fn write_template(destination: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, content)?;
    Ok(())
}

/// Copies the template's `hook_paths` into `plugin_dir`.
///
/// `overwrite` replaces differing files without asking. Otherwise each
/// conflict is resolved through `responses`; unrecognized answers are
/// asked again for the same file.
pub fn reconcile_hooks<P, Q>(
    template_dir: P,
    plugin_dir: Q,
    hook_paths: &[&str],
    overwrite: bool,
    responses: &mut dyn ResponseSource,
) -> Result<ReconcileReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let template_dir = template_dir.as_ref();
    let plugin_dir = plugin_dir.as_ref();
    let mut overwrite_all = overwrite;
    let mut report = ReconcileReport::default();

    for hook in hook_paths {
        let template_path = template_dir.join(hook);
        let plugin_path = plugin_dir.join(hook);
        let template_content = fs::read(&template_path)?;

        if !plugin_path.is_file() {
            debug!("Writing missing hook: {}", plugin_path.display());
            write_template(&plugin_path, &template_content)?;
            report.outcomes.push((plugin_path, HookOutcome::Created));
            continue;
        }

        if fs::read(&plugin_path)? == template_content {
            debug!(
                "File contents match: \"{}\" and \"{}\"",
                plugin_path.display(),
                template_path.display()
            );
            report.outcomes.push((plugin_path, HookOutcome::Identical));
            continue;
        }

        let response = if overwrite_all {
            ConflictResponse::Overwrite
        } else {
            loop {
                let answer = responses.respond(&conflict_prompt(&plugin_path))?;
                match ConflictResponse::parse(&answer) {
                    Some(response) => break response,
                    None => debug!("Unrecognized response: {answer:?}"),
                }
            }
        };

        let outcome = match response {
            ConflictResponse::Skip => {
                debug!("Skipping: {}", plugin_path.display());
                HookOutcome::Skipped
            }
            ConflictResponse::SkipAll => {
                debug!("Skipping all remaining files");
                report.outcomes.push((plugin_path, HookOutcome::Skipped));
                report.stopped_early = true;
                return Ok(report);
            }
            ConflictResponse::Backup => {
                let backup = backup_path(&plugin_path, Local::now());
                fs::copy(&plugin_path, &backup)?;
                debug!("Wrote backup to: {}", backup.display());
                write_template(&plugin_path, &template_content)?;
                HookOutcome::BackedUp { backup }
            }
            ConflictResponse::Overwrite => {
                debug!("Overwriting: {}", plugin_path.display());
                write_template(&plugin_path, &template_content)?;
                HookOutcome::Overwritten
            }
            ConflictResponse::OverwriteAll => {
                debug!("Overwriting: {}", plugin_path.display());
                overwrite_all = true;
                write_template(&plugin_path, &template_content)?;
                HookOutcome::Overwritten
            }
        };
        report.outcomes.push((plugin_path, outcome));
    }

    Ok(report)
}
