//! Observability subsystem
//!
//! Structured JSON logging for the command-line surface. The schema
//! compiler and validator never log; callers report their results.
//!
//! # Usage
//!
//! ```ignore
//! use tabschema::observability::{log_event, Event, Logger, Severity};
//!
//! let logger = Logger::new(Severity::Info);
//! log_event(&logger, Event::CompileComplete, &[("columns", "4")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a typed event at its own severity
pub fn log_event(logger: &Logger, event: Event, fields: &[(&str, &str)]) {
    logger.log(event.severity(), event.as_str(), fields);
}
