//! # CLI Module
//!
//! Command-line front end of the `dtogen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! dtogen generate ./bin ../app/models/generated api --http-client
//! dtogen generate --settings dtogen.json
//! ```
//!
//! Positional arguments are `SOURCE`, `DESTINATION` and `API_PATH`, all
//! optional. Data services are only generated when `API_PATH` is given.
//! `--files` and `--class` take comma-separated lists.
//!
//! ### `inspect`
//!
//! ```bash
//! dtogen inspect ./bin --class ApiController,ControllerBase
//! ```
//!
//! Prints each endpoint with its method signatures in TypeScript notation,
//! followed by the closed model set (`*` marks models used directly by an
//! endpoint).
//!
//! ## Exit status
//!
//! `0` on success, `2` for configuration errors, `1` for anything else.

mod commands;


pub use commands::{
    exit_code, options_for, run_cli, Cli, Commands, SelectionArgs, EXIT_CONFIG_ERROR, EXIT_FAILURE,
};
