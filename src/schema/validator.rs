//! Machine-readability check for column title sets
//!
//! A title set is machine readable when:
//! - every title is an identifier (`[A-Za-z_$][A-Za-z0-9_$]*`)
//! - no title repeats an earlier one
//!
//! All columns are scanned before failing so the caller sees every
//! defect at once.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::errors::{ValidationError, ValidationResult};
use super::types::Columns;

static TITLE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn title_pattern() -> &'static Regex {
    TITLE_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("title pattern must compile")
    })
}

/// Returns whether `title` can be used as a machine-readable column name
pub fn is_valid_title(title: &str) -> bool {
    title_pattern().is_match(title)
}

/// Validates titles of a compiled column set.
///
/// # Errors
///
/// Returns a single `ValidationError` listing, in column order, every
/// title that is not an identifier and every repeat of an earlier title.
pub fn validate_machine_titles(columns: &Columns) -> ValidationResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(columns.len());
    let mut problems = Vec::new();

    for (index, column) in columns.iter().enumerate() {
        let title = column.title.as_str();

        if !is_valid_title(title) {
            problems.push(format!(
                "col. {} name '{}' is not a valid column name",
                index, title
            ));
        }

        if !seen.insert(title) {
            problems.push(format!("col. {} name '{}' is not unique", index, title));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(problems))
    }
}
