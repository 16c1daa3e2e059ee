//! Ignore pattern handling for the template tree.
//! Combines the built-in ignore list with an optional `.templateignore`
//! file found at the template root.

use crate::constants::IGNORE_FILE;
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Reads the `.templateignore` lines, skipping blanks and `#` comments.
///
/// A missing file yields no patterns.
pub fn read_ignore_file<P: AsRef<Path>>(template_dir: P) -> Result<Vec<String>> {
    let ignore_path = template_dir.as_ref().join(IGNORE_FILE);
    if !ignore_path.exists() {
        debug!("{} does not exist", ignore_path.display());
        return Ok(Vec::new());
    }
    let contents = read_to_string(&ignore_path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Compiles the built-in patterns plus the template's own ignore file.
///
/// Patterns are matched against base names, so both exact names
/// (`rename.py`) and globs (`*.pyc`) work.
pub fn build_ignore_set<P: AsRef<Path>>(template_dir: P, defaults: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in defaults {
        builder.add(Glob::new(pattern)?);
    }
    for pattern in read_ignore_file(template_dir)? {
        debug!("Ignoring pattern from {IGNORE_FILE}: {pattern}");
        builder.add(Glob::new(&pattern)?);
    }
    Ok(builder.build()?)
}
