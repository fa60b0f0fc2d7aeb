//! Certa Knowledge Base ingestion
//!
//! Reads the JSON exchange format and produces a validated
//! [`certa_domain::KnowledgeBase`].
//!
//! # Document format
//!
//! ```json
//! {
//!   "questions": { "symptom_fever": "Do you have fever?" },
//!   "facts": [ { "name": "age", "value": 20, "cf": 1.0, "explanation": "Given" } ],
//!   "rules": [
//!     {
//!       "id": "R1",
//!       "conditions": [ { "fact1": "$symptom_fever", "op": "==", "fact2": "yes" } ],
//!       "conclusion": [ "disease", "flu" ],
//!       "cf": 0.9,
//!       "explanation": "Fever suggests flu"
//!     }
//!   ]
//! }
//! ```
//!
//! Loading is atomic: the whole document is validated before a knowledge base
//! is returned.
//!
//! ```
//! let kb = certa_kb::load_from_str(r#"{"questions": {"fever": "Fever?"}}"#).unwrap();
//! assert_eq!(kb.question("fever"), Some("Fever?"));
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod loader;
mod summary;

pub use document::{ConditionEntry, FactEntry, KnowledgeDocument, RuleEntry};
pub use error::KbError;
pub use loader::{build, load_from_path, load_from_str, DEFAULT_FACT_EXPLANATION};
pub use summary::KbSummary;
