//! Error types for the ability parser
//!
//! Parsing card text never fails. These errors cover the edges around it:
//! decoding card records, loading configuration, and building rule tables.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbilityError {
    #[error("Invalid pattern for rule '{rule}': {source}")]
    InvalidPattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown {kind} category: {name}")]
    UnknownCategory { kind: &'static str, name: String },

    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AbilityError>;
