//! Common constants used throughout the plugin scaffolder.

/// Placeholder token written throughout the template's Python sources.
pub const TEMPLATE_TOKEN: &str = "microdrop-plugin-template";

/// Glob selecting the text files whose contents get token substitution.
pub const REWRITE_GLOB: &str = "*.py";

/// Files that keep the placeholder token verbatim.
pub const REWRITE_EXCLUDE: [&str; 1] = ["on_plugin_install.py"];

/// Template entry-point module, shipped under a marker name.
pub const MARKER_FILE: &str = "__init__.py.template";

/// Suffix stripped from [`MARKER_FILE`] once the tree is materialized.
pub const MARKER_SUFFIX: &str = ".template";

/// Template ignore file name.
pub const IGNORE_FILE: &str = ".templateignore";

/// Base names that are never copied out of the template tree.
pub const DEFAULT_IGNORE: [&str; 7] = [
    "*.pyc",
    "__init__.py",
    "create_plugin.py",
    "init_hooks.py",
    "rename.py",
    "*bash.exe.stackdump",
    IGNORE_FILE,
];

/// Hook scripts kept in sync between the template and existing plugins.
pub const HOOK_PATHS: [&str; 3] = [
    "hooks/Windows/on_plugin_install.bat",
    "hooks/Linux/on_plugin_install.sh",
    "on_plugin_install.py",
];

/// Annotated tag created on the initial commit.
pub const INITIAL_TAG: &str = "v0.1";

/// Version written to [`VERSION_FILE`] when no repository could be tagged.
pub const INITIAL_VERSION: &str = "0.1";

/// Plain-text version marker.
pub const VERSION_FILE: &str = "RELEASE-VERSION";

/// Dependency list consumed by the package installer.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Release metadata written next to the packaged sources.
pub const PROPERTIES_FILE: &str = "properties.yml";

/// Prefix of the per-invocation staging directory.
pub const STAGING_PREFIX: &str = "create_plugin-";

/// `strftime` format appended to backups of overwritten hook files.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%Hh%Mm%S";

/// Environment variable overriding the template directory.
pub const TEMPLATE_ENV: &str = "PLUGIN_SCAFFOLD_TEMPLATE";

/// Template tree shipped with the crate.
pub const BUNDLED_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/template");
