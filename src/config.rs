//! Explicit configuration handed to every pipeline entry point.

use std::path::{Path, PathBuf};

use crate::constants::{
    BUNDLED_TEMPLATE_DIR, DEFAULT_IGNORE, INITIAL_TAG, INITIAL_VERSION, MARKER_FILE,
    MARKER_SUFFIX, REWRITE_EXCLUDE, REWRITE_GLOB, TEMPLATE_TOKEN,
};

/// Everything the scaffolding components need to know about the template.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// Root of the read-only template tree.
    pub template_dir: PathBuf,
    /// Base-name patterns excluded from materialization.
    pub ignore: Vec<String>,
    /// Placeholder replaced in the copied sources.
    pub token: String,
    /// Glob selecting files whose contents are rewritten.
    pub rewrite_glob: String,
    /// File names that keep the placeholder verbatim.
    pub rewrite_exclude: Vec<String>,
    /// Marker-named entry-point module.
    pub marker_file: String,
    /// Suffix stripped from `marker_file`.
    pub marker_suffix: String,
    pub initial_tag: String,
    pub initial_version: String,
    pub commit_message: String,
    pub tag_message: String,
    /// Identity used for the initial commit when git has none configured.
    pub fallback_identity: (String, String),
}

impl ScaffoldConfig {
    /// Configuration rooted at `template_dir` with the built-in defaults.
    pub fn new<P: AsRef<Path>>(template_dir: P) -> Self {
        Self {
            template_dir: template_dir.as_ref().to_path_buf(),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            token: TEMPLATE_TOKEN.to_string(),
            rewrite_glob: REWRITE_GLOB.to_string(),
            rewrite_exclude: REWRITE_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            marker_file: MARKER_FILE.to_string(),
            marker_suffix: MARKER_SUFFIX.to_string(),
            initial_tag: INITIAL_TAG.to_string(),
            initial_version: INITIAL_VERSION.to_string(),
            commit_message: "Initial commit".to_string(),
            tag_message: "Initial release".to_string(),
            fallback_identity: (
                "plugin-scaffold".to_string(),
                "plugin-scaffold@localhost".to_string(),
            ),
        }
    }

    /// Resolves the template directory from an explicit override, falling
    /// back to the tree shipped with the crate.
    pub fn from_template_override(template_dir: Option<PathBuf>) -> Self {
        Self::new(template_dir.unwrap_or_else(|| PathBuf::from(BUNDLED_TEMPLATE_DIR)))
    }
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self::new(BUNDLED_TEMPLATE_DIR)
    }
}
