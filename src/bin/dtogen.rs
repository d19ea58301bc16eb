use clap::Parser;
use dtogen::cli::{exit_code, run_cli, Cli};
use dtogen::logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&LogConfig::from_env()) {
        eprintln!("Warning: {e:#}");
    }
    if let Err(e) = run_cli(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code(&e));
    }
}
