//! Tabular schema subsystem
//!
//! Compiles JSON-Schema-shaped documents describing rectangular data into
//! an ordered column model.
//!
//! # Design Principles
//!
//! - Structural shape errors are fatal; per-column gaps are problems
//! - Column order is declaration order and never changes
//! - Unknown column keywords pass through untouched
//! - Compilation and validation are pure and deterministic

mod compiler;
mod errors;
mod loader;
mod types;
mod validator;

pub use compiler::{compile, Compiled};
pub use errors::{
    CompileError, CompileResult, LoadError, LoadResult, SchemaErrorCode, ValidationError,
    ValidationResult, INVALID_TABULAR_SCHEMA,
};
pub use loader::SchemaLoader;
pub use types::{base_tabular_schema, Column, Columns, Problem, ProblemKind, TypeUnion};
pub use validator::{is_valid_title, validate_machine_titles};
