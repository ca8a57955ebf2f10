//! Flattens the JSON Schema `allOf` keyword by folding each listed subschema
//! into the schema which declares it, producing an equivalent schema which
//! may be used by consumers that cannot evaluate `allOf`.
//!
//! ```
//! use allof::{Dialect, Reducer};
//! use serde_json::json;
//!
//! let mut doc = json!({
//!     "type": "object",
//!     "allOf": [
//!         {"properties": {"a": {"type": "string"}}, "required": ["a"]},
//!         {"properties": {"a": {"minLength": 2}}, "required": ["b"]},
//!     ],
//! });
//! Reducer::new(Dialect::Draft07, []).flatten(&mut doc).unwrap();
//!
//! assert_eq!(doc, json!({
//!     "type": "object",
//!     "properties": {"a": {"type": "string", "minLength": 2}},
//!     "required": ["a", "b"],
//! }));
//! ```
mod collapse;
mod compare;
pub mod keywords;
mod merge;
mod number;
mod path;
mod reduce;
pub mod vocabulary;
pub mod walker;

pub use collapse::collapse;
pub use compare::json_eq;
pub use number::Number;
pub use path::{Path, Token};
pub use reduce::Reducer;
pub use vocabulary::{Dialect, Merge, Vocabulary};

/// Error is a failure to fold a subschema into its parent.
/// Any Error aborts the whole document pass, and leaves the document
/// partially transformed.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("at '{path}': keyword '{keyword}' is not supported")]
    UnsupportedKeyword { path: Path, keyword: String },
    #[error("at '{path}': keyword '{keyword}' cannot be merged alongside '{companion}'")]
    UnsupportedInteraction {
        path: Path,
        keyword: String,
        companion: String,
    },
    #[error("at '{path}': keyword '{keyword}' mixes single-schema and tuple forms")]
    UnsupportedForm { path: Path, keyword: String },
    #[error("at '{path}': keyword '{keyword}' has conflicting values {parent} and {subschema}")]
    Collision {
        path: Path,
        keyword: String,
        parent: serde_json::Value,
        subschema: serde_json::Value,
    },
    #[error("at '{path}': cannot collapse {subschema} subschema into {parent} schema")]
    UnsupportedBooleanSchemaCollapse {
        path: Path,
        parent: &'static str,
        subschema: &'static str,
    },
    #[error("at '{path}': keyword '{keyword}' expected {expected}")]
    ShapeMismatch {
        path: Path,
        keyword: String,
        expected: &'static str,
    },
    #[error("at '{path}': expected a schema (an object or boolean)")]
    ExpectedSchema { path: Path },
    #[error("unknown JSON Schema dialect '{0}'")]
    UnknownDialect(String),
}

impl Error {
    /// Path of the schema at which the Error occurred, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::UnsupportedKeyword { path, .. }
            | Error::UnsupportedInteraction { path, .. }
            | Error::UnsupportedForm { path, .. }
            | Error::Collision { path, .. }
            | Error::UnsupportedBooleanSchemaCollapse { path, .. }
            | Error::ShapeMismatch { path, .. }
            | Error::ExpectedSchema { path } => Some(path),
            Error::UnknownDialect(_) => None,
        }
    }

    /// Keyword which failed to merge, if any.
    pub fn keyword(&self) -> Option<&str> {
        match self {
            Error::UnsupportedKeyword { keyword, .. }
            | Error::UnsupportedInteraction { keyword, .. }
            | Error::UnsupportedForm { keyword, .. }
            | Error::Collision { keyword, .. }
            | Error::ShapeMismatch { keyword, .. } => Some(keyword),
            _ => None,
        }
    }
}
