//! Command-line interface implementation for the plugin scaffolder.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::TEMPLATE_ENV;

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(author, version, about = "Create and maintain Microdrop plugins", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new plugin from the template
    Create {
        /// Output directory. Its name must be a valid Python module name
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Force overwrite of existing directory
        #[arg(short, long)]
        force_overwrite: bool,

        /// Disable git repo initialization
        #[arg(long)]
        no_git: bool,

        /// Template directory to generate from
        #[arg(long, env = TEMPLATE_ENV, value_name = "DIR")]
        template: Option<PathBuf>,
    },

    /// Update a plugin's hook scripts from the template
    InitHooks {
        /// Plugin directory
        #[arg(value_name = "PLUGIN_DIR", default_value = ".")]
        plugin_dir: PathBuf,

        /// Force overwrite of existing files
        #[arg(short, long)]
        force_overwrite: bool,

        /// Template directory holding the reference hooks
        #[arg(long, env = TEMPLATE_ENV, value_name = "DIR")]
        template: Option<PathBuf>,
    },

    /// Package a plugin into a .tar.gz archive
    Release {
        /// Plugin directory
        #[arg(value_name = "PLUGIN_DIR", default_value = ".")]
        plugin_dir: PathBuf,

        /// Directory receiving the archive
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Plugin name recorded in properties.yml
        #[arg(long)]
        plugin_name: Option<String>,

        /// Package name used for the archive and properties.yml
        #[arg(long)]
        package_name: Option<String>,
    },

    /// Install the plugin's requirements.txt with an external installer
    InstallRequirements {
        /// Plugin directory
        #[arg(value_name = "PLUGIN_DIR", default_value = ".")]
        plugin_dir: PathBuf,

        /// Installer program
        #[arg(long, default_value = "pip")]
        installer: String,

        /// Extra argument passed to the installer before `-r <file>`
        #[arg(long = "installer-arg", value_name = "ARG", allow_hyphen_values = true)]
        installer_args: Vec<String>,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
