//! Explanation reports for established facts

use crate::FactStore;
use certa_domain::certainty::format_percent;
use certa_domain::{FactValue, Provenance};
use std::fmt;

/// How a fact came to be believed, or that it was not
#[derive(Debug, Clone, PartialEq)]
pub enum Explanation {
    /// The fact is in working memory
    Established {
        /// Fact name
        name: String,
        /// Current value
        value: FactValue,
        /// Combined confidence
        cf: f64,
        /// Reasoning recorded by the last assertion
        explanation: String,
        /// How the fact was established
        provenance: Provenance,
    },

    /// Nothing is known about the fact
    NotProven {
        /// Goal that was asked about
        name: String,
    },
}

impl Explanation {
    /// Build the report for a fact from working memory
    pub fn for_fact(name: &str, facts: &FactStore) -> Self {
        match facts.get(name) {
            Some(fact) => Explanation::Established {
                name: fact.name.clone(),
                value: fact.value.clone(),
                cf: fact.cf,
                explanation: fact.explanation.clone(),
                provenance: fact.provenance.clone(),
            },
            None => Explanation::NotProven {
                name: name.to_string(),
            },
        }
    }

    /// Whether the fact was established
    pub fn is_established(&self) -> bool {
        matches!(self, Explanation::Established { .. })
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explanation::Established {
                name,
                value,
                cf,
                explanation,
                ..
            } => {
                writeln!(f, "Conclusion: {} is {}", name, value)?;
                writeln!(f, "Confidence: {}", format_percent(*cf))?;
                write!(f, "Reasoning: {}", explanation)
            }
            Explanation::NotProven { name } => write!(f, "Goal '{}' could not be proven.", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_established_report() {
        let mut facts = FactStore::new();
        facts.assert(
            "disease",
            "flu".into(),
            0.9,
            "Fever suggests flu",
            Provenance::Derived {
                rule_id: "R1".to_string(),
            },
        );

        let report = Explanation::for_fact("disease", &facts);
        assert!(report.is_established());
        assert_eq!(
            report.to_string(),
            "Conclusion: disease is flu\nConfidence: 90.00%\nReasoning: Fever suggests flu"
        );
    }

    #[test]
    fn test_not_proven_report() {
        let report = Explanation::for_fact("allergy", &FactStore::new());
        assert!(!report.is_established());
        assert_eq!(report.to_string(), "Goal 'allergy' could not be proven.");
    }
}
