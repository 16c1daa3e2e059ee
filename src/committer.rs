//! Promotion of a fully staged scaffold into its output directory.
//!
//! The staging directory is created next to the output directory so that
//! promotion is a single directory rename. When the rename is refused
//! (for example because the two paths sit on different volumes) the tree
//! is copied and the staging copy deleted instead; that fallback is not
//! atomic and a crash midway can leave a partial output directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::constants::STAGING_PREFIX;
use crate::error::{Error, Result};

/// Exclusively owned working directory for one scaffold invocation.
///
/// The directory is removed when the value is dropped unless it has been
/// promoted, so every exit path of the pipeline cleans up after itself.
pub struct StagingDir {
    inner: TempDir,
}

impl StagingDir {
    /// Creates a uniquely named staging directory beside `output_dir`.
    pub fn beside<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        let output_dir = output_dir.as_ref();
        let parent = match output_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        fs::create_dir_all(&parent)?;
        Self::in_dir(parent)
    }

    /// Creates a uniquely named staging directory under `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let inner = tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir_in(dir)?;
        debug!("Created staging directory {}", inner.path().display());
        Ok(Self { inner })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

/// Fails with [`Error::AlreadyExists`] when `output_dir` is present and
/// overwriting is not authorized.
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, overwrite: bool) -> Result<()> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !overwrite {
        return Err(Error::AlreadyExists { output_dir: output_dir.display().to_string() });
    }
    Ok(())
}

/// Moves the staged tree at `staging` into `output_dir`.
///
/// An existing `output_dir` is only cleared when `overwrite` is set;
/// otherwise neither path is touched and [`Error::AlreadyExists`] is
/// returned. Cleanup of `staging` on failure is left to its
/// [`StagingDir`] owner.
pub fn commit<P, Q>(staging: P, output_dir: Q, overwrite: bool) -> Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let staging = staging.as_ref();
    let output_dir = output_dir.as_ref();

    ensure_output_dir(output_dir, overwrite)?;

    if output_dir.is_dir() {
        clear_dir(output_dir)?;
        fs::remove_dir(output_dir)?;
    } else if output_dir.exists() {
        fs::remove_file(output_dir)?;
    }

    promote(staging, output_dir, |from, to| fs::rename(from, to))?;
    Ok(output_dir.to_path_buf())
}

/// Moves `staging` to the vacant `output_dir` path with `rename`.
///
/// When `rename` fails the tree is copied to `output_dir` and `staging`
/// is deleted afterwards. That fallback is not atomic.
pub fn promote<F>(staging: &Path, output_dir: &Path, rename: F) -> Result<()>
where
    F: FnOnce(&Path, &Path) -> std::io::Result<()>,
{
    if let Err(e) = rename(staging, output_dir) {
        warn!(
            "Could not rename {} to {} ({}); copying instead, promotion is not atomic",
            staging.display(),
            output_dir.display(),
            e
        );
        copy_tree(staging, output_dir)?;
        fs::remove_dir_all(staging)?;
    }

    debug!("Promoted {} to {}", staging.display(), output_dir.display());
    Ok(())
}

/// Removes every child of `dir`, leaving `dir` itself in place.
pub fn clear_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_dir() && !path.is_symlink() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
