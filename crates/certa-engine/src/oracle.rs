//! In-memory answer oracle

use crate::PendingQuestion;
use certa_domain::{Answer, AnswerOracle};
use std::collections::HashMap;
use std::convert::Infallible;

/// Answer oracle backed by a `HashMap`
///
/// Used by the CLI and by tests. Questions the engine asks for are recorded in
/// request order so the caller can prompt for them.
#[derive(Debug, Clone, Default)]
pub struct MemoryOracle {
    answers: HashMap<String, Answer>,
    requested: Vec<PendingQuestion>,
}

impl MemoryOracle {
    /// Create an empty oracle
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any previous one
    pub fn submit(&mut self, fact: impl Into<String>, answer: Answer) {
        let fact = fact.into();
        tracing::debug!("Answer submitted for '{}'", fact);
        self.requested.retain(|question| question.fact != fact);
        self.answers.insert(fact, answer);
    }

    /// Record an unweighted answer
    pub fn submit_value(&mut self, fact: impl Into<String>, raw: impl Into<String>) {
        self.submit(fact, Answer::new(raw));
    }

    /// Forget an answer; returns it if one was recorded
    ///
    /// Facts already elicited by an engine are not retracted.
    pub fn withdraw(&mut self, fact: &str) -> Option<Answer> {
        self.answers.remove(fact)
    }

    /// Questions requested and not yet answered, oldest first
    pub fn requested(&self) -> &[PendingQuestion] {
        &self.requested
    }

    /// Most recent outstanding request
    pub fn last_request(&self) -> Option<&PendingQuestion> {
        self.requested.last()
    }

    /// Number of recorded answers
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether no answers are recorded
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl AnswerOracle for MemoryOracle {
    type Error = Infallible;

    fn has_answer(&self, fact: &str) -> bool {
        self.answers.contains_key(fact)
    }

    fn answer(&self, fact: &str) -> Result<Option<Answer>, Self::Error> {
        Ok(self.answers.get(fact).cloned())
    }

    fn request_answer(&mut self, fact: &str, prompt: &str) {
        if self.requested.iter().any(|question| question.fact == fact) {
            return;
        }
        self.requested.push(PendingQuestion {
            fact: fact.to_string(),
            prompt: prompt.to_string(),
        });
    }
}
