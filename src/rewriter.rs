//! Literal token substitution across the text files of a directory.
//!
//! Files are rewritten in place and not atomically: an interrupted write
//! can leave a truncated file behind. That is acceptable while the
//! rewrite only ever targets a staging directory.

use std::fs;
use std::path::{Path, PathBuf};

use globset::Glob;
use log::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Replaces every literal occurrence of `old` with `new` in the files under
/// `dir` whose base name matches `pattern`, except those named in
/// `exclude`.
///
/// Returns the files whose contents changed.
pub fn rewrite_tokens<P: AsRef<Path>>(
    dir: P,
    pattern: &str,
    old: &str,
    new: &str,
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(pattern)?.compile_matcher();
    let mut rewritten = Vec::new();

    for entry in WalkDir::new(dir.as_ref()).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !matcher.is_match(entry.file_name()) {
            continue;
        }
        let excluded = entry
            .file_name()
            .to_str()
            .is_some_and(|name| exclude.iter().any(|e| e == name));
        if excluded {
            debug!("Leaving excluded file untouched: {}", entry.path().display());
            continue;
        }

        let content = fs::read_to_string(entry.path())?;
        if !content.contains(old) {
            continue;
        }
        fs::write(entry.path(), content.replace(old, new))?;
        debug!("Rewrote '{}' in {}", old, entry.path().display());
        rewritten.push(entry.path().to_path_buf());
    }

    Ok(rewritten)
}
