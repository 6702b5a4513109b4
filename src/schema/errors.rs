//! Tabular schema error types
//!
//! Error codes:
//! - TABULAR_INVALID_SCHEMA (structural shape cannot be read as a table)
//! - TABULAR_UNIMPLEMENTED (recognized but unsupported shape)
//! - TABULAR_INVALID_COLUMN_NAMES (title set is not machine readable)
//! - TABULAR_SCHEMA_READ_FAILED / TABULAR_SCHEMA_PARSE_FAILED (loader)
//!
//! Every compile and validation error displays with the
//! `invalid tabular schema` prefix so callers can test for the category
//! without matching the full text.

use std::fmt;

use thiserror::Error;

/// Prefix shared by every compile and validation error message
pub const INVALID_TABULAR_SCHEMA: &str = "invalid tabular schema";

/// Stable error codes for tabular schema failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema shape cannot be interpreted as tabular
    TabularInvalidSchema,
    /// Schema shape is recognized but not supported
    TabularUnimplemented,
    /// Column titles are not valid or not unique
    TabularInvalidColumnNames,
    /// Schema document could not be read
    TabularSchemaReadFailed,
    /// Schema document is not valid JSON
    TabularSchemaParseFailed,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::TabularInvalidSchema => "TABULAR_INVALID_SCHEMA",
            SchemaErrorCode::TabularUnimplemented => "TABULAR_UNIMPLEMENTED",
            SchemaErrorCode::TabularInvalidColumnNames => "TABULAR_INVALID_COLUMN_NAMES",
            SchemaErrorCode::TabularSchemaReadFailed => "TABULAR_SCHEMA_READ_FAILED",
            SchemaErrorCode::TabularSchemaParseFailed => "TABULAR_SCHEMA_PARSE_FAILED",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Fatal compilation failure. No partial column set accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid tabular schema: {0}")]
    InvalidSchema(String),

    #[error("invalid tabular schema: object wrapper schemas are not yet supported")]
    Unimplemented,
}

impl CompileError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CompileError::InvalidSchema(message.into())
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            CompileError::InvalidSchema(_) => SchemaErrorCode::TabularInvalidSchema,
            CompileError::Unimplemented => SchemaErrorCode::TabularUnimplemented,
        }
    }

    /// Always true; kept symmetric with `ValidationError` and `LoadError`
    pub fn is_invalid_tabular_schema(&self) -> bool {
        true
    }
}

/// Aggregated title-set defects, one line per offending column
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tabular schema: column names have problems:\n{}", .problems.join("\n"))]
pub struct ValidationError {
    problems: Vec<String>,
}

impl ValidationError {
    pub fn new(problems: Vec<String>) -> Self {
        Self { problems }
    }

    /// Returns the violation lines in column scan order
    pub fn problems(&self) -> &[String] {
        &self.problems
    }

    pub fn code(&self) -> SchemaErrorCode {
        SchemaErrorCode::TabularInvalidColumnNames
    }

    pub fn is_invalid_tabular_schema(&self) -> bool {
        true
    }
}

/// Failure reading a schema document from outside the process
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read schema '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("schema '{path}' is not valid JSON: {reason}")]
    Parse { path: String, reason: String },

    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl LoadError {
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            LoadError::Read { .. } => SchemaErrorCode::TabularSchemaReadFailed,
            LoadError::Parse { .. } => SchemaErrorCode::TabularSchemaParseFailed,
            LoadError::Compile(e) => e.code(),
        }
    }

    /// True only when the document was read but its shape is not tabular
    pub fn is_invalid_tabular_schema(&self) -> bool {
        matches!(self, LoadError::Compile(_))
    }
}

/// Result type for schema compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Result type for title-set validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for schema loading
pub type LoadResult<T> = Result<T, LoadError>;
