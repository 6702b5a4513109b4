//! CLI argument definitions using clap
//!
//! Commands:
//! - tabschema compile [--schema <path>] [--config <path>]
//! - tabschema validate [--schema <path>] [--config <path>]
//! - tabschema base

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabschema - compile and check tabular JSON schemas
#[derive(Parser, Debug)]
#[command(name = "tabschema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a tabular schema into its column model
    Compile {
        /// Schema document; read from stdin when omitted
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compile a schema and check that its column titles are machine readable
    Validate {
        /// Schema document; read from stdin when omitted
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the base (empty) tabular schema
    Base,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
