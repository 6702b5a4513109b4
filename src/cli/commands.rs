//! CLI command implementations
//!
//! Each command loads configuration, reads one schema document, runs the
//! compiler (and, for `validate`, the title check) and produces one JSON
//! response. Logging goes to stderr.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::observability::{log_event, Event, Logger, Severity};
use crate::schema::{base_tabular_schema, compile as compile_schema, Columns, Problem, SchemaLoader};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Run the machine-readable title check on every compile (default: false)
    #[serde(default)]
    pub require_machine_titles: bool,

    /// Treat compile problems as a failure (default: false)
    #[serde(default)]
    pub fail_on_problems: bool,

    /// Log each compile problem as a warning (default: true)
    #[serde(default = "default_log_problems")]
    pub log_problems: bool,

    /// Minimum log severity: trace, info, warn or error (default: "info")
    #[serde(default = "default_min_severity")]
    pub min_severity: String,
}

fn default_log_problems() -> bool {
    true
}
fn default_min_severity() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            require_machine_titles: false,
            fail_on_problems: false,
            log_problems: default_log_problems(),
            min_severity: default_min_severity(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        self.severity().map(|_| ())
    }

    /// Parsed `min_severity`
    pub fn severity(&self) -> CliResult<Severity> {
        self.min_severity
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid min_severity: {}", e)))
    }

    /// Logger honoring `min_severity`
    pub fn logger(&self) -> CliResult<Logger> {
        Ok(Logger::new(self.severity()?))
    }
}

/// Main CLI entry point
///
/// Parses arguments, dispatches, and writes an error response on failure.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    let result = run_command(cli.command);

    if let Err(ref e) = result {
        write_error(e.code_str(), e.message())?;
    }

    result
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let data = match cmd {
        Command::Compile { schema, config } => compile(schema.as_deref(), config.as_deref())?,
        Command::Validate { schema, config } => validate(schema.as_deref(), config.as_deref())?,
        Command::Base => base_tabular_schema(),
    };

    write_response(data)
}

/// Compile a schema file (or stdin) and return the response payload
pub fn compile(schema_path: Option<&Path>, config_path: Option<&Path>) -> CliResult<Value> {
    let (config, logger) = setup(config_path)?;
    let schema = read_schema(schema_path, &logger)?;
    compile_document(&schema, &config, &logger)
}

/// Compile a schema file (or stdin) and require machine-readable titles
pub fn validate(schema_path: Option<&Path>, config_path: Option<&Path>) -> CliResult<Value> {
    let (config, logger) = setup(config_path)?;
    let schema = read_schema(schema_path, &logger)?;
    validate_document(&schema, &config, &logger)
}

/// Compiles an in-memory schema document.
///
/// Payload: `{"columns": [...], "problems": [...]}`.
pub fn compile_document(schema: &Value, config: &Config, logger: &Logger) -> CliResult<Value> {
    let (columns, problems) = compile_checked(schema, config, logger)?;

    if config.require_machine_titles {
        check_titles(&columns, logger)?;
    }

    Ok(json!({
        "columns": serde_json::to_value(&columns)?,
        "problems": serde_json::to_value(&problems)?,
    }))
}

/// Compiles an in-memory schema document and checks its titles.
///
/// Payload: `{"valid": true, "titles": [...]}`.
pub fn validate_document(schema: &Value, config: &Config, logger: &Logger) -> CliResult<Value> {
    let (columns, _) = compile_checked(schema, config, logger)?;
    check_titles(&columns, logger)?;

    Ok(json!({
        "valid": true,
        "titles": columns.titles(),
    }))
}

fn setup(config_path: Option<&Path>) -> CliResult<(Config, Logger)> {
    let config = Config::load_or_default(config_path)?;
    let logger = config.logger()?;

    if let Some(path) = config_path {
        let path = path.display().to_string();
        log_event(&logger, Event::ConfigLoaded, &[("path", path.as_str())]);
    }

    Ok((config, logger))
}

fn read_schema(path: Option<&Path>, logger: &Logger) -> CliResult<Value> {
    let (schema, origin) = match path {
        Some(path) => (SchemaLoader::read(path)?, path.display().to_string()),
        None => (read_request()?, "<stdin>".to_string()),
    };

    log_event(logger, Event::SchemaRead, &[("origin", origin.as_str())]);
    Ok(schema)
}

/// Runs the compiler, logs its outcome, and applies `fail_on_problems`
fn compile_checked(
    schema: &Value,
    config: &Config,
    logger: &Logger,
) -> CliResult<(Columns, Vec<Problem>)> {
    let compiled = match compile_schema(schema) {
        Ok(compiled) => compiled,
        Err(e) => {
            let message = e.to_string();
            log_event(
                logger,
                Event::CompileFailed,
                &[("code", e.code().code()), ("error", message.as_str())],
            );
            return Err(e.into());
        }
    };

    if config.log_problems {
        for problem in &compiled.problems {
            let column = problem.column.to_string();
            let message = problem.to_string();
            log_event(
                logger,
                Event::ColumnProblem,
                &[("column", column.as_str()), ("problem", message.as_str())],
            );
        }
    }

    let column_count = compiled.columns.len().to_string();
    let problem_count = compiled.problems.len().to_string();
    log_event(
        logger,
        Event::CompileComplete,
        &[("columns", column_count.as_str()), ("problems", problem_count.as_str())],
    );

    if config.fail_on_problems && compiled.has_problems() {
        return Err(CliError::problems_found(compiled.problems.len()));
    }

    Ok(compiled.into_parts())
}

fn check_titles(columns: &Columns, logger: &Logger) -> CliResult<()> {
    match columns.validate_machine_titles() {
        Ok(()) => {
            let count = columns.len().to_string();
            log_event(logger, Event::TitlesValid, &[("columns", count.as_str())]);
            Ok(())
        }
        Err(e) => {
            let count = e.problems().len().to_string();
            log_event(logger, Event::TitlesInvalid, &[("violations", count.as_str())]);
            Err(e.into())
        }
    }
}
