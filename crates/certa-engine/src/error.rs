//! Error types for proof sessions
//!
//! Non-provability and suspension are results, not errors (see
//! [`crate::Proof`]). Only boundary failures end up here.

use thiserror::Error;

/// Errors that can occur while running a proof session
#[derive(Error, Debug)]
pub enum EngineError {
    /// The answer oracle failed to report an answer
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
