//! Certa Engine
//!
//! Backward-chaining proof engine with certainty factors and a suspend/resume
//! answer protocol.
//!
//! # Overview
//!
//! The engine is responsible for:
//! - **Goal proof**: Recursively proving a goal from the rules that conclude it
//! - **Confidence propagation**: Conjunction by minimum, attenuation by the rule
//!   cf, and OR-combination across independent firings
//! - **Elicitation**: Asking the [`certa_domain::AnswerOracle`] for facts that
//!   have a registered question
//! - **Explanation**: Reporting how a fact was established, plus an ordered trace
//!
//! # Architecture
//!
//! A proof never blocks. When an answer is missing, [`ProofEngine::prove_goal`]
//! returns [`Proof::Suspended`] with the pending question, and the caller proves
//! the goal again once the oracle has the answer. Settled outcomes are kept in
//! the fact store and the [`ProofCache`], so each re-walk is cheap.
//!
//! | Result | Scalar view | Cached |
//! |--------|-------------|--------|
//! | `Proven { cf }` | `cf` | yes |
//! | `Unprovable` | `0.0` | yes |
//! | `Suspended(question)` | `-1.0` | never |
//!
//! # Usage
//!
//! ```
//! use certa_domain::{Conclusion, Condition, Fact, KnowledgeBase, Operand, Operator, Rule};
//! use certa_engine::{EngineConfig, MemoryOracle, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut kb = KnowledgeBase::new();
//! kb.add_fact(Fact::new("age", 20.0, 1.0, "given"));
//! kb.add_rule(Rule::new(
//!     "ADULT",
//!     vec![Condition::new(Operand::parse("$age"), Operator::Ge, Operand::parse("18"))],
//!     Conclusion::new("status", "adult"),
//!     1.0,
//!     "Age of majority reached",
//! ));
//!
//! let mut session = Session::new(kb, EngineConfig::default(), MemoryOracle::new())?;
//! let proof = session.prove_goal("status")?;
//! assert_eq!(proof.as_cf(), 1.0);
//! println!("{}", session.engine().explain("status"));
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [engine]
//! reasoning = "approximate"
//! max_depth = 64
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod explanation;
mod fact_store;
mod oracle;
mod proof_cache;
mod session;
mod stats;

pub use config::{EngineConfig, ReasoningMode, DEFAULT_MAX_DEPTH};
pub use engine::{
    LiteralConflict, PendingQuestion, Proof, ProofEngine, Shadowed, ELICITED_EXPLANATION,
    IMPLIED_EXPLANATION,
};
pub use error::EngineError;
pub use explanation::Explanation;
pub use fact_store::FactStore;
pub use oracle::MemoryOracle;
pub use proof_cache::{ProofCache, Settled};
pub use session::{Session, SessionId};
pub use stats::ProofStats;
