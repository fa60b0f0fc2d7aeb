//! Certa Domain Layer
//!
//! This crate contains the data model of the Certa rule engine. It has ZERO
//! external dependencies and defines the value objects, the certainty-factor
//! arithmetic and the trait interface that the engine and the presentation
//! layer depend upon.
//!
//! ## Key Concepts
//!
//! - **Fact**: a named value with a certainty factor and a provenance
//! - **Condition**: a binary comparison between two operands
//! - **Rule**: a conjunction of conditions concluding one fact
//! - **Certainty Factor (CF)**: belief strength in [0, 1]
//! - **Knowledge Base**: the ingested questions, given facts and rules
//! - **Answer Oracle**: the external supplier of user answers
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and arithmetic only
//! - The proof engine lives in `certa-engine`, ingestion in `certa-kb`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod certainty;
pub mod condition;
pub mod fact;
pub mod knowledge_base;
pub mod rule;
pub mod traits;

// Re-exports for convenience
pub use condition::{Condition, Operand, Operator, REFERENCE_MARKER};
pub use fact::{Fact, FactValue, Provenance};
pub use knowledge_base::KnowledgeBase;
pub use rule::{Conclusion, Rule};
pub use traits::{Answer, AnswerOracle};
