//! Packaging of a plugin directory into a distributable archive.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use git2::{DescribeFormatOptions, DescribeOptions, Repository};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{PROPERTIES_FILE, REQUIREMENTS_FILE, VERSION_FILE};
use crate::error::{Error, Result};

/// Metadata shipped inside every release archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseProperties {
    pub plugin_name: String,
    pub package_name: String,
    pub version: String,
}

/// Options for [`package_release`].
#[derive(Debug, Clone, Default)]
pub struct ReleaseOptions {
    /// Defaults to the package name with underscores turned into hyphens.
    pub plugin_name: Option<String>,
    /// Defaults to the plugin directory's name.
    pub package_name: Option<String>,
}

fn describe(repo: &Repository) -> Result<String> {
    let mut options = DescribeOptions::new();
    options.describe_tags();
    let description = repo.describe(&options)?;

    let mut format = DescribeFormatOptions::new();
    format.dirty_suffix("-dirty");
    let version = description.format(Some(&format))?;
    Ok(version.strip_prefix('v').unwrap_or(&version).to_string())
}

/// Version of the plugin at `plugin_dir`.
///
/// Taken from the nearest tag of its git repository, or from the
/// `RELEASE-VERSION` file when there is no tagged repository.
pub fn derive_version<P: AsRef<Path>>(plugin_dir: P) -> Result<String> {
    let plugin_dir = plugin_dir.as_ref();
    match Repository::open(plugin_dir) {
        Ok(repo) => match describe(&repo) {
            Ok(version) => return Ok(version),
            Err(e) => debug!("Could not describe repository: {e}"),
        },
        Err(e) => debug!("No git repository in {}: {}", plugin_dir.display(), e.message()),
    }

    let version_path = plugin_dir.join(VERSION_FILE);
    if version_path.is_file() {
        let version = fs::read_to_string(&version_path)?.trim().to_string();
        if !version.is_empty() {
            return Ok(version);
        }
    }

    Err(Error::ReleaseError(format!(
        "cannot determine version of '{}': no tagged git repository and no {VERSION_FILE}",
        plugin_dir.display()
    )))
}

/// Writes `properties.yml` into `plugin_dir`.
pub fn write_properties<P: AsRef<Path>>(
    plugin_dir: P,
    properties: &ReleaseProperties,
) -> Result<PathBuf> {
    let path = plugin_dir.as_ref().join(PROPERTIES_FILE);
    fs::write(&path, serde_yaml::to_string(properties)?)?;
    Ok(path)
}

/// Paths (relative to `plugin_dir`) that belong in the archive.
fn release_entries(plugin_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut sources: Vec<PathBuf> = fs::read_dir(plugin_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "py"))
        .filter_map(|path| path.file_name().map(PathBuf::from))
        .collect();
    sources.sort();

    for extra in [PROPERTIES_FILE, "hooks", REQUIREMENTS_FILE] {
        if plugin_dir.join(extra).exists() {
            sources.push(PathBuf::from(extra));
        }
    }
    Ok(sources)
}

/// Builds `<package_name>-<version>.tar.gz` for the plugin at
/// `plugin_dir` inside `output_dir` and returns the archive path.
pub fn package_release<P, Q>(plugin_dir: P, output_dir: Q, options: &ReleaseOptions) -> Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let plugin_dir = plugin_dir.as_ref().canonicalize()?;
    let package_name = match &options.package_name {
        Some(name) => name.clone(),
        None => plugin_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| Error::ReleaseError("plugin directory has no name".to_string()))?,
    };
    let plugin_name = options
        .plugin_name
        .clone()
        .unwrap_or_else(|| package_name.replace('_', "-"));

    let properties = ReleaseProperties {
        plugin_name,
        package_name: package_name.clone(),
        version: derive_version(&plugin_dir)?,
    };
    let properties_path = write_properties(&plugin_dir, &properties)?;
    println!("Wrote: {}", properties_path.display());

    fs::create_dir_all(output_dir.as_ref())?;
    let archive_path = output_dir
        .as_ref()
        .join(format!("{}-{}.tar.gz", package_name, properties.version));

    let encoder = GzEncoder::new(File::create(&archive_path)?, Compression::default());
    let mut archive = tar::Builder::new(encoder);
    for entry in release_entries(&plugin_dir)? {
        let source = plugin_dir.join(&entry);
        debug!("Adding to archive: {}", entry.display());
        if source.is_dir() {
            archive.append_dir_all(&entry, &source)?;
        } else {
            archive.append_path_with_name(&source, &entry)?;
        }
    }
    archive.into_inner()?.finish()?;

    println!("Wrote: {}", archive_path.display());
    Ok(archive_path)
}
