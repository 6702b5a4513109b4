//! tabschema - compiler and validator for tabular JSON schemas
//!
//! Turns a JSON-Schema-shaped description of rectangular data into an
//! ordered, typed column model, with non-fatal per-column problems
//! reported alongside.

pub mod cli;
pub mod observability;
pub mod schema;
