//! CLI module for tabschema
//!
//! Provides command-line interface for:
//! - compile: Schema document to column model
//! - validate: Column model plus machine-readable title check
//! - base: Print the base tabular schema

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    compile, compile_document, run, run_command, validate, validate_document, Config,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
