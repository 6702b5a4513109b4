//! tabschema CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`, which writes the JSON
//! response. Exits non-zero on failure.

use tabschema::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
