//! Best-effort version control for a freshly staged scaffold.

use std::fs;
use std::path::{Path, PathBuf};

use git2::{IndexAddOption, ObjectType, Repository, Signature};
use log::{debug, error};

use crate::config::ScaffoldConfig;
use crate::constants::VERSION_FILE;
use crate::error::{Error, Result};

/// How the scaffold's initial version was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMarker {
    /// A repository was created and its first commit carries this tag.
    Tagged(String),
    /// Version control was skipped or failed; a version file was written.
    VersionFile(PathBuf),
}

/// Initializes a repository in `dir`, commits every file and creates an
/// annotated tag on that commit. Returns the tag name.
pub fn init_repository<P: AsRef<Path>>(dir: P, config: &ScaffoldConfig) -> Result<String> {
    let dir = dir.as_ref();
    let repo = Repository::init(dir)?;
    debug!("Initialized git repository in {}", dir.display());

    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;

    let signature = match repo.signature() {
        Ok(signature) => signature,
        Err(e) => {
            debug!("No git identity configured ({}); using fallback", e.message());
            let (name, email) = &config.fallback_identity;
            Signature::now(name, email)?
        }
    };

    let commit_id =
        repo.commit(Some("HEAD"), &signature, &signature, &config.commit_message, &tree, &[])?;
    let commit = repo.find_object(commit_id, Some(ObjectType::Commit))?;
    repo.tag(&config.initial_tag, &commit, &signature, &config.tag_message, false)?;

    Ok(config.initial_tag.clone())
}

/// Writes the plain-text version marker into `dir`.
pub fn write_version_file<P: AsRef<Path>>(dir: P, version: &str) -> Result<PathBuf> {
    let path = dir.as_ref().join(VERSION_FILE);
    fs::write(&path, version)?;
    Ok(path)
}

/// Records the initial version of the scaffold in `dir`.
///
/// When `init_git` is set a tagged repository is attempted first. Any
/// failure there is logged and swallowed; the version file is written
/// whenever the tag was not created.
pub fn record_initial_version<P: AsRef<Path>>(
    dir: P,
    config: &ScaffoldConfig,
    init_git: bool,
) -> Result<VersionMarker> {
    let dir = dir.as_ref();
    if init_git {
        match init_repository(dir, config) {
            Ok(tag) => {
                println!("Initialized plugin as git repo (tag={tag})");
                return Ok(VersionMarker::Tagged(tag));
            }
            Err(e) => {
                let e = Error::VersionControlFailure(e.to_string());
                error!("{e}");
            }
        }
    }

    let path = write_version_file(dir, &config.initial_version)?;
    println!("Wrote version to file: {VERSION_FILE}");
    Ok(VersionMarker::VersionFile(path))
}
