use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use plugin_scaffold::{
    error::Error,
    release::{derive_version, package_release, ReleaseOptions, ReleaseProperties},
};
use tempfile::TempDir;

fn make_plugin(parent: &Path, name: &str) -> PathBuf {
    let plugin = parent.join(name);
    fs::create_dir_all(plugin.join("hooks/Linux")).unwrap();
    fs::write(plugin.join("__init__.py"), "# plugin\n").unwrap();
    fs::write(plugin.join("on_plugin_install.py"), "# install\n").unwrap();
    fs::write(plugin.join("hooks/Linux/on_plugin_install.sh"), "#!/bin/sh\n").unwrap();
    fs::write(plugin.join("requirements.txt"), "numpy\n").unwrap();
    fs::write(plugin.join("notes.md"), "not packaged\n").unwrap();
    plugin
}

fn archive_entries(path: &Path) -> Vec<String> {
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(path).unwrap()));
    let mut names: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().trim_end_matches('/').to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_version_from_release_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("RELEASE-VERSION"), "0.1\n").unwrap();
    assert_eq!(derive_version(temp.path()).unwrap(), "0.1");
}

#[test]
fn test_version_unavailable() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(derive_version(temp.path()), Err(Error::ReleaseError(_))));
}

#[test]
fn test_version_from_git_tag() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.py"), "x").unwrap();
    let repo = git2::Repository::init(temp.path()).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("a.py")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = git2::Signature::now("tester", "tester@example.com").unwrap();
    let commit = repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[]).unwrap();
    let object = repo.find_object(commit, None).unwrap();
    repo.tag("v1.2", &object, &sig, "release", false).unwrap();

    assert_eq!(derive_version(temp.path()).unwrap(), "1.2");
}

#[test]
fn test_package_release() {
    let workspace = TempDir::new().unwrap();
    let plugin = make_plugin(workspace.path(), "my_plugin");
    fs::write(plugin.join("RELEASE-VERSION"), "0.1").unwrap();
    let dist = workspace.path().join("dist");

    let archive = package_release(&plugin, &dist, &ReleaseOptions::default()).unwrap();

    assert_eq!(archive, dist.join("my_plugin-0.1.tar.gz"));
    let properties: ReleaseProperties =
        serde_yaml::from_str(&fs::read_to_string(plugin.join("properties.yml")).unwrap())
            .unwrap();
    assert_eq!(
        properties,
        ReleaseProperties {
            plugin_name: "my-plugin".to_string(),
            package_name: "my_plugin".to_string(),
            version: "0.1".to_string(),
        }
    );

    let entries = archive_entries(&archive);
    assert!(entries.contains(&"__init__.py".to_string()));
    assert!(entries.contains(&"on_plugin_install.py".to_string()));
    assert!(entries.contains(&"properties.yml".to_string()));
    assert!(entries.contains(&"requirements.txt".to_string()));
    assert!(entries.contains(&"hooks/Linux/on_plugin_install.sh".to_string()));
    assert!(!entries.contains(&"notes.md".to_string()));
    assert!(!entries.contains(&"RELEASE-VERSION".to_string()));
}

#[test]
fn test_package_release_custom_names() {
    let workspace = TempDir::new().unwrap();
    let plugin = make_plugin(workspace.path(), "my_plugin");
    fs::write(plugin.join("RELEASE-VERSION"), "2.0").unwrap();
    let options = ReleaseOptions {
        plugin_name: Some("lab.my_plugin".to_string()),
        package_name: Some("renamed".to_string()),
    };

    let archive = package_release(&plugin, workspace.path(), &options).unwrap();

    assert_eq!(archive.file_name().unwrap(), "renamed-2.0.tar.gz");
    let properties = fs::read_to_string(plugin.join("properties.yml")).unwrap();
    assert!(properties.contains("plugin_name: lab.my_plugin"));
}
