//! Schema document loader
//!
//! Reads schema documents from disk or from an in-memory string and hands
//! them to the compiler. This is the only part of the schema subsystem
//! that touches the filesystem.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::compiler::{compile, Compiled};
use super::errors::{LoadError, LoadResult};

/// Stateless entry point for reading tabular schema documents.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Reads and parses a JSON schema document from `path`.
    pub fn read(path: &Path) -> LoadResult<Value> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        parse(&path.display().to_string(), &content)
    }

    /// Parses a JSON schema document held in memory.
    pub fn read_str(content: &str) -> LoadResult<Value> {
        parse("<in-memory>", content)
    }

    /// Reads the document at `path` and compiles it.
    pub fn compile_file(path: &Path) -> LoadResult<Compiled> {
        let schema = Self::read(path)?;
        Ok(compile(&schema)?)
    }
}

fn parse(origin: &str, content: &str) -> LoadResult<Value> {
    serde_json::from_str(content).map_err(|e| LoadError::Parse {
        path: origin.to_string(),
        reason: e.to_string(),
    })
}
