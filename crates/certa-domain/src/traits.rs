//! Trait definitions for external interactions
//!
//! The answer oracle is the boundary between the proof engine and whatever
//! collects answers from the operator (a terminal prompt, a web form, a test
//! fixture). Implementations live in other crates.

use crate::certainty;

/// A previously submitted answer
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// Raw value as entered
    pub raw: String,

    /// Optional confidence weight supplied with the answer
    pub weight: Option<f64>,
}

impl Answer {
    /// Create an answer without a weight
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            weight: None,
        }
    }

    /// Attach a confidence weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Weight to use under approximate reasoning
    ///
    /// Defaults to full certainty when absent; clamped into [0, 1].
    pub fn effective_weight(&self) -> f64 {
        self.weight.map_or(certainty::CERTAIN, certainty::clamp)
    }

    /// Whether the operator actually entered something
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// Trait for the store of operator answers
///
/// The engine never blocks on it: a missing answer makes the proof suspend, and
/// the engine calls [`AnswerOracle::request_answer`] so the presentation layer
/// knows which prompt to render.
pub trait AnswerOracle {
    /// Error type for oracle operations
    type Error;

    /// Whether an answer has been submitted for the fact
    fn has_answer(&self, fact: &str) -> bool;

    /// The submitted answer for the fact, if any
    fn answer(&self, fact: &str) -> Result<Option<Answer>, Self::Error>;

    /// Notification that the engine needs an answer for `fact`
    fn request_answer(&mut self, fact: &str, prompt: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_weight() {
        assert_eq!(Answer::new("yes").effective_weight(), 1.0);
        assert_eq!(Answer::new("yes").with_weight(0.6).effective_weight(), 0.6);
        assert_eq!(Answer::new("yes").with_weight(3.0).effective_weight(), 1.0);
    }

    #[test]
    fn test_blank_answer() {
        assert!(Answer::new("   ").is_blank());
        assert!(!Answer::new("no").is_blank());
    }
}
