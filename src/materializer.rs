//! Copies collected template files into a staging directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;

/// Copies each of `files` (relative to `source_root`) byte-for-byte to the
/// same relative path under `dest_root`, creating parents as needed.
pub fn materialize<P, Q>(source_root: P, files: &[PathBuf], dest_root: Q) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source_root = source_root.as_ref();
    let dest_root = dest_root.as_ref();

    for relative in files {
        let target = dest_root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Copying file: {}", target.display());
        fs::copy(source_root.join(relative), &target)?;
    }
    Ok(())
}

/// Renames `marker_file` under `dir` to its name without `marker_suffix`,
/// replacing any file already at that path.
///
/// Returns the new path, or `None` when the marker file is absent.
pub fn rename_marker<P: AsRef<Path>>(
    dir: P,
    marker_file: &str,
    marker_suffix: &str,
) -> Result<Option<PathBuf>> {
    let dir = dir.as_ref();
    let source = dir.join(marker_file);
    let Some(stripped) = marker_file.strip_suffix(marker_suffix) else {
        return Ok(None);
    };
    if !source.is_file() {
        return Ok(None);
    }

    let target = dir.join(stripped);
    if target.exists() {
        fs::remove_file(&target)?;
    }
    fs::rename(&source, &target)?;
    debug!("Renamed {} to {}", source.display(), target.display());
    Ok(Some(target))
}
