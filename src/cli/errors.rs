//! CLI-specific error types

use std::fmt;
use std::io;

use crate::schema::{CompileError, LoadError, ValidationError};

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/schema file)
    IoError,
    /// Schema could not be compiled
    InvalidSchema,
    /// Column titles are not machine readable
    InvalidTitles,
    /// Compilation reported problems and the config forbids them
    ProblemsFound,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TABULAR_CLI_CONFIG_ERROR",
            Self::IoError => "TABULAR_CLI_IO_ERROR",
            Self::InvalidSchema => "TABULAR_CLI_INVALID_SCHEMA",
            Self::InvalidTitles => "TABULAR_CLI_INVALID_TITLES",
            Self::ProblemsFound => "TABULAR_CLI_PROBLEMS_FOUND",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn problems_found(count: usize) -> Self {
        Self::new(
            CliErrorCode::ProblemsFound,
            format!("schema compiled with {} problem(s)", count),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<CompileError> for CliError {
    fn from(e: CompileError) -> Self {
        Self::new(CliErrorCode::InvalidSchema, e.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::new(CliErrorCode::InvalidTitles, e.to_string())
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Compile(e) => e.into(),
            other => Self::io_error(other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
