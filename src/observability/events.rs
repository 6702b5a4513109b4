//! Observable events
//!
//! Events are explicit and typed; each maps to a stable log name.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded
    ConfigLoaded,
    /// Schema document read from file or stdin
    SchemaRead,
    /// Schema compiled into a column set
    CompileComplete,
    /// Schema shape rejected
    CompileFailed,
    /// Recoverable per-column defect
    ColumnProblem,
    /// Titles passed the machine-readability check
    TitlesValid,
    /// Titles failed the machine-readability check
    TitlesInvalid,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaRead => "SCHEMA_READ",
            Event::CompileComplete => "COMPILE_COMPLETE",
            Event::CompileFailed => "COMPILE_FAILED",
            Event::ColumnProblem => "COLUMN_PROBLEM",
            Event::TitlesValid => "TITLES_VALID",
            Event::TitlesInvalid => "TITLES_INVALID",
        }
    }

    /// Severity an event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConfigLoaded | Event::SchemaRead => Severity::Trace,
            Event::CompileComplete | Event::TitlesValid => Severity::Info,
            Event::ColumnProblem => Severity::Warn,
            Event::CompileFailed | Event::TitlesInvalid => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
