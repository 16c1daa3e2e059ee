//! Application entry point.
//! Parses the command line, configures logging and dispatches to the
//! library's pipelines.

use plugin_scaffold::{
    cli::{get_args, Commands},
    config::ScaffoldConfig,
    constants::HOOK_PATHS,
    error::{default_error_handler, Result},
    hooks::reconcile_hooks,
    install::{install_requirements, Installer},
    prompt::TerminalResponses,
    release::{package_release, ReleaseOptions},
    scaffold::{create_plugin, CreateOptions},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration; RUST_LOG overrides the verbosity flag.
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    if let Err(err) = run(args.command) {
        default_error_handler(err);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Create { output_dir, force_overwrite, no_git, template } => {
            let config = ScaffoldConfig::from_template_override(template);
            let options = CreateOptions { overwrite: force_overwrite, init_git: !no_git };
            let output_dir = create_plugin(&config, output_dir, options)?;
            println!("Wrote plugin to: {}", output_dir.display());
        }
        Commands::InitHooks { plugin_dir, force_overwrite, template } => {
            let config = ScaffoldConfig::from_template_override(template);
            let mut responses = TerminalResponses::new();
            let report = reconcile_hooks(
                &config.template_dir,
                &plugin_dir,
                &HOOK_PATHS,
                force_overwrite,
                &mut responses,
            )?;
            for (path, outcome) in &report.outcomes {
                log::info!("{}: {:?}", path.display(), outcome);
            }
        }
        Commands::Release { plugin_dir, output_dir, plugin_name, package_name } => {
            let options = ReleaseOptions { plugin_name, package_name };
            package_release(plugin_dir, output_dir, &options)?;
        }
        Commands::InstallRequirements { plugin_dir, installer, installer_args } => {
            let mut args = vec!["install".to_string()];
            args.extend(installer_args);
            let installer = Installer { program: installer, args };
            let plugin_dir = if plugin_dir.is_absolute() {
                plugin_dir
            } else {
                std::env::current_dir()?.join(plugin_dir)
            };
            install_requirements(plugin_dir.canonicalize()?, &installer)?;
        }
    }
    Ok(())
}
