//! Column model produced by the tabular schema compiler
//!
//! - `TypeUnion`: one or more accepted primitive type names
//! - `Column`: title, type union, description and a validation keyword bag
//! - `Columns`: the ordered column set for one schema document
//! - `Problem`: a recoverable, per-column diagnostic

use std::fmt;
use std::slice;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};

use super::errors::ValidationResult;

/// Ordered set of type names a column accepts, e.g. `["number", "null"]`.
///
/// Encodes as a bare string when it holds exactly one name, as an array of
/// strings otherwise. An empty union means "unset" and is skipped by
/// containing structs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypeUnion(Vec<String>);

impl TypeUnion {
    /// Creates a union of exactly one type name
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns whether `name` is one of the accepted types
    pub fn has_type(&self, name: &str) -> bool {
        self.0.iter().any(|t| t == name)
    }
}

impl From<&str> for TypeUnion {
    fn from(name: &str) -> Self {
        Self::single(name)
    }
}

impl From<Vec<String>> for TypeUnion {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl FromIterator<String> for TypeUnion {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for TypeUnion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.as_slice() {
            [] => serializer.serialize_none(),
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }
}

/// Wire shapes accepted for a type union, tried in declaration order
#[derive(Deserialize)]
#[serde(untagged)]
enum TypeUnionRepr {
    Single(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for TypeUnion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match TypeUnionRepr::deserialize(deserializer) {
            Ok(TypeUnionRepr::Single(name)) => Ok(Self(vec![name])),
            Ok(TypeUnionRepr::Many(names)) => Ok(Self(names)),
            Err(_) => Err(de::Error::custom("invalid data for ColType")),
        }
    }
}

/// One field of a table.
///
/// Keys other than `title`, `type` and `description` are kept verbatim in
/// `validation` and flattened back into the column object on output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub title: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_nullable_union",
        skip_serializing_if = "TypeUnion::is_empty"
    )]
    pub col_type: TypeUnion,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub validation: Map<String, Value>,
}

impl Column {
    pub fn new(title: impl Into<String>, col_type: impl Into<TypeUnion>) -> Self {
        Self {
            title: title.into(),
            col_type: col_type.into(),
            description: None,
            validation: Map::new(),
        }
    }

    /// Sets the description; an empty string leaves it unset
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.is_empty() { None } else { Some(description) };
        self
    }

    /// Adds one validation keyword, e.g. `("max", json!(5))`
    pub fn with_validation(mut self, key: impl Into<String>, value: Value) -> Self {
        self.validation.insert(key.into(), value);
        self
    }
}

/// An unset union encodes as `null`, so a column's `type` may read back as one
fn deserialize_nullable_union<'de, D>(deserializer: D) -> Result<TypeUnion, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TypeUnion>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_blank(description: &Option<String>) -> bool {
    description.as_deref().map_or(true, str::is_empty)
}

/// Ordered column set. Position maps to the physical cell index of a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Columns(Vec<Column>);

impl Columns {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Column> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.0.get(index)
    }

    pub fn push(&mut self, column: Column) {
        self.0.push(column);
    }

    /// Returns column titles in declaration order
    pub fn titles(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.title.as_str()).collect()
    }

    /// Checks that every title is an identifier and that titles are unique.
    pub fn validate_machine_titles(&self) -> ValidationResult<()> {
        super::validator::validate_machine_titles(self)
    }

    /// Wraps the columns in an array-wrapper schema document.
    ///
    /// Compiling the returned document yields a column set equal to `self`.
    pub fn to_schema(&self) -> serde_json::Result<Value> {
        let items = serde_json::to_value(self)?;
        Ok(json!({
            "type": "array",
            "items": {
                "type": "array",
                "items": items,
            },
        }))
    }
}

impl From<Vec<Column>> for Columns {
    fn from(columns: Vec<Column>) -> Self {
        Self(columns)
    }
}

impl FromIterator<Column> for Columns {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Columns {
    type Item = Column;
    type IntoIter = std::vec::IntoIter<Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a Column;
    type IntoIter = slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// What went wrong with a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// Positional entry is not a JSON object
    NotAnObject,
    /// No string `title` key
    TitleNotSet,
    /// No `type` key; the column defaults to `string`
    TypeNotSet,
}

/// Recoverable defect found while compiling one column.
///
/// Problems never fail compilation. They are returned alongside the
/// column set and serialize as their display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    /// Zero-based column position
    pub column: usize,
    pub kind: ProblemKind,
}

impl Problem {
    pub fn new(column: usize, kind: ProblemKind) -> Self {
        Self { column, kind }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Punctuation differs between messages; downstream tooling matches on it.
        match self.kind {
            ProblemKind::NotAnObject => write!(f, "col. {} schema should be an object", self.column),
            ProblemKind::TitleNotSet => write!(f, "col. {} title is not set", self.column),
            ProblemKind::TypeNotSet => {
                write!(f, "col, {} type is not set, defaulting to string", self.column)
            }
        }
    }
}

impl Serialize for Problem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The smallest valid array-wrapper schema: rows of zero positional cells.
pub fn base_tabular_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "array",
            "items": [],
        },
    })
}
