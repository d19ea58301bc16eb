use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigError, HttpModule, Options};
use crate::generator::{generate, inspect};

/// Exit status for invalid configuration
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit status for any other failure
pub const EXIT_FAILURE: i32 = 1;

/// Command-line interface for dtogen
///
/// Finds the data-transfer types exposed by endpoint classes and writes
/// TypeScript definitions (plus optional Angular data services) for them.
#[derive(Parser, Debug)]
#[command(name = "dtogen", version)]
#[command(about = "Generate TypeScript models from endpoint metadata", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Module selection shared by every command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionArgs {
    /// Comma-separated module file patterns, relative to SOURCE
    #[arg(long, value_delimiter = ',')]
    pub files: Vec<String>,

    /// Comma-separated endpoint base class names
    #[arg(long = "class", value_delimiter = ',')]
    pub classes: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate TypeScript models (and data services when API_PATH is given)
    Generate {
        /// Directory containing the module files [default: ./]
        source: Option<PathBuf>,

        /// Directory the generated files are written to [default: ../models/generated]
        destination: Option<PathBuf>,

        /// Prefix for API calls; leave out to skip data services
        api_path: Option<String>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Generate data services for the Angular HttpClient module
        #[arg(long, default_value_t = false)]
        http_client: bool,

        /// Import models from the generated index instead of their own files
        #[arg(long, default_value_t = false)]
        combine_imports: bool,

        /// Read every option from a JSON, YAML or TOML settings file
        #[arg(
            long,
            value_name = "FILE",
            conflicts_with_all = ["source", "destination", "api_path", "files", "classes", "http_client", "combine_imports"]
        )]
        settings: Option<PathBuf>,
    },
    /// Print endpoints and the resolved model set without writing files
    Inspect {
        /// Directory containing the module files [default: ./]
        source: Option<PathBuf>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Take source and selection from a settings file
        #[arg(long, value_name = "FILE", conflicts_with_all = ["source", "files", "classes"])]
        settings: Option<PathBuf>,
    },
}

fn apply_selection(mut options: Options, selection: &SelectionArgs) -> Options {
    let files: Vec<String> = selection.files.iter().filter(|f| !f.is_empty()).cloned().collect();
    if !files.is_empty() {
        options.files = files;
    }
    let classes: Vec<String> = selection.classes.iter().filter(|c| !c.is_empty()).cloned().collect();
    if !classes.is_empty() {
        options.endpoint_base_names = classes;
    }
    options
}

/// Build validated options for a command.
///
/// # Errors
///
/// Returns a [`ConfigError`] for a bad settings file or empty paths.
pub fn options_for(command: &Commands) -> Result<Options, ConfigError> {
    match command {
        Commands::Generate {
            settings: Some(path),
            ..
        }
        | Commands::Inspect {
            settings: Some(path),
            ..
        } => Options::from_settings_file(path),
        Commands::Generate {
            source,
            destination,
            api_path,
            selection,
            http_client,
            combine_imports,
            settings: None,
        } => {
            let defaults = Options::default();
            let options = Options {
                source: source.clone().unwrap_or(defaults.source.clone()),
                destination: destination.clone().unwrap_or(defaults.destination.clone()),
                api_path: api_path.clone().filter(|p| !p.trim().is_empty()),
                http_module: if *http_client {
                    HttpModule::HttpClient
                } else {
                    HttpModule::Http
                },
                combine_imports: *combine_imports,
                ..defaults
            };
            apply_selection(options, selection).validate()
        }
        Commands::Inspect {
            source,
            selection,
            settings: None,
        } => {
            let defaults = Options::default();
            let options = Options {
                source: source.clone().unwrap_or(defaults.source.clone()),
                ..defaults
            };
            apply_selection(options, selection).validate()
        }
    }
}

/// Run a parsed command line, printing user-facing output to stdout.
///
/// # Errors
///
/// Configuration problems surface as a [`ConfigError`] inside the returned
/// error; see [`exit_code`].
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let options = options_for(&cli.command)?;
    match cli.command {
        Commands::Generate { .. } => {
            let report = generate(&options)?;
            println!(
                "Scanned {} for DTO objects: {} endpoint(s), {} model(s)",
                report.source.display(),
                report.endpoints,
                report.models.len()
            );
            if !report.services.is_empty() {
                println!("Generated {} data service(s)", report.services.len());
            }
            if !report.removed.is_empty() {
                println!("Removed {} stale file(s)", report.removed.len());
            }
            println!(
                "Done in {:.3}s -> {}",
                report.elapsed.as_secs_f64(),
                report.destination.display()
            );
        }
        Commands::Inspect { .. } => {
            print!("{}", inspect(&options)?);
        }
    }
    Ok(())
}

/// Process exit status for an error returned by [`run_cli`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ConfigError>().is_some() {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_FAILURE
    }
}
