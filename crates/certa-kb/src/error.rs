//! Error types for knowledge-base ingestion

use thiserror::Error;

/// Errors that abort loading a knowledge base
///
/// Ingestion is all-or-nothing: any of these leaves no partial knowledge base.
#[derive(Error, Debug)]
pub enum KbError {
    /// The document could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// The document is not valid JSON or has the wrong shape
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// A required member is absent
    #[error("Missing field '{field}' in {context}")]
    MissingField {
        /// Where the member was expected
        context: String,
        /// Name of the member
        field: String,
    },

    /// A condition uses an unknown comparison operator
    #[error("Invalid operator '{op}' in rule '{rule}'")]
    InvalidOperator {
        /// Rule id
        rule: String,
        /// Operator as written
        op: String,
    },

    /// A rule is structurally invalid
    #[error("Invalid rule '{rule}': {reason}")]
    InvalidRule {
        /// Rule id
        rule: String,
        /// What is wrong with it
        reason: String,
    },

    /// A given fact is structurally invalid
    #[error("Invalid fact: {0}")]
    InvalidFact(String),

    /// Two rules share an id
    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(String),
}

impl From<serde_json::Error> for KbError {
    fn from(e: serde_json::Error) -> Self {
        KbError::JsonParse(e.to_string())
    }
}

impl From<std::io::Error> for KbError {
    fn from(e: std::io::Error) -> Self {
        KbError::Io(e.to_string())
    }
}
