//! Collects the files of a template tree.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use log::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Walks `root` and returns every file path relative to it, skipping files
/// whose base name matches `ignore`.
///
/// Directories are descended into but never returned; empty directories
/// contribute nothing. Paths are returned in sorted order.
pub fn collect_files<P: AsRef<Path>>(root: P, ignore: &GlobSet) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if ignore.is_match(entry.file_name()) {
            debug!("Skipping ignored file: {}", entry.path().display());
            continue;
        }
        // Entries yielded by WalkDir always live under the root.
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }

    Ok(files)
}
