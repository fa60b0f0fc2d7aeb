//! Proof cache - settled outcomes keyed by goal name
//!
//! Suspension is never cached: it is recomputed on every pass until the oracle
//! answers. Settled outcomes are permanent because facts are never retracted.

use crate::Proof;
use std::collections::HashMap;

/// A permanent outcome for a goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Settled {
    /// Proven with this confidence
    Proven(f64),
    /// No supporting evidence
    Unprovable,
}

impl Settled {
    /// Convert a proof result, if it is settled
    pub fn from_proof(proof: &Proof) -> Option<Self> {
        match proof {
            Proof::Proven { cf } => Some(Settled::Proven(*cf)),
            Proof::Unprovable => Some(Settled::Unprovable),
            Proof::Suspended(_) => None,
        }
    }
}

impl From<Settled> for Proof {
    fn from(settled: Settled) -> Self {
        match settled {
            Settled::Proven(cf) => Proof::Proven { cf },
            Settled::Unprovable => Proof::Unprovable,
        }
    }
}

/// Memo table of settled goals
#[derive(Debug, Clone, Default)]
pub struct ProofCache {
    entries: HashMap<String, Settled>,
}

impl ProofCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Settled outcome for a goal, if any
    pub fn get(&self, goal: &str) -> Option<Settled> {
        self.entries.get(goal).copied()
    }

    /// Record the outcome of a goal; returns false for suspended proofs
    pub fn record(&mut self, goal: &str, proof: &Proof) -> bool {
        match Settled::from_proof(proof) {
            Some(settled) => {
                self.entries.insert(goal.to_string(), settled);
                true
            }
            None => false,
        }
    }
}
