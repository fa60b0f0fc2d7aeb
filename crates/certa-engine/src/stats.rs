//! Counters collected while proving goals

/// Statistics for one proof session
///
/// Tracks proof attempts, rule firings, memo hits and elicitation activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofStats {
    /// Top-level `prove_goal` calls
    pub passes: usize,

    /// Goals actually searched (memo misses)
    pub attempts: usize,

    /// Goals answered from the fact store or proof cache
    pub memo_hits: usize,

    /// Rule firings committed to the fact store
    pub firings: usize,

    /// Answers taken from the oracle
    pub elicited: usize,

    /// Passes that ended suspended
    pub suspensions: usize,
}

impl ProofStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} pass(es), {} attempt(s), {} memo hit(s), {} firing(s), {} answer(s), {} suspension(s)",
            self.passes, self.attempts, self.memo_hits, self.firings, self.elicited, self.suspensions
        )
    }
}
