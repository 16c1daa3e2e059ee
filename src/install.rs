//! Post-install processing: installs a plugin's Python requirements.

use std::path::Path;
use std::process::Command;

use chrono::Local;
use log::debug;

use crate::constants::REQUIREMENTS_FILE;
use crate::error::{Error, Result};

/// External package installer invoked as `<program> <args..> -r <file>`.
#[derive(Debug, Clone)]
pub struct Installer {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Installer {
    fn default() -> Self {
        Self { program: "pip".to_string(), args: vec!["install".to_string()] }
    }
}

/// Installs the requirements listed in `plugin_root/requirements.txt`.
///
/// Returns `false` when the plugin has no requirements file.
///
/// # Errors
/// * [`Error::InstallerFailure`] if the installer cannot be started or
///   exits unsuccessfully; the message holds its output
pub fn install_requirements<P: AsRef<Path>>(plugin_root: P, installer: &Installer) -> Result<bool> {
    let plugin_root = plugin_root.as_ref();
    let plugin = plugin_root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| plugin_root.display().to_string());

    println!("[{}] Processing post-install hook for: {}", Local::now(), plugin);

    let requirements = plugin_root.join(REQUIREMENTS_FILE);
    if !requirements.exists() {
        debug!("No {} in {}", REQUIREMENTS_FILE, plugin_root.display());
        return Ok(false);
    }

    debug!("Running {} {:?} -r {}", installer.program, installer.args, requirements.display());
    let output = Command::new(&installer.program)
        .args(&installer.args)
        .arg("-r")
        .arg(&requirements)
        .output()
        .map_err(|e| Error::InstallerFailure {
            plugin: plugin.clone(),
            message: format!("failed to run '{}': {}", installer.program, e),
        })?;

    if !output.status.success() {
        let mut message = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            if !message.is_empty() {
                message.push('\n');
            }
            message.push_str(stdout.trim_end());
        }
        if message.is_empty() {
            message = format!("'{}' exited with {}", installer.program, output.status);
        }
        return Err(Error::InstallerFailure { plugin, message });
    }

    println!("[{}] Completed post-install processing for: {}", Local::now(), plugin);
    Ok(true)
}
