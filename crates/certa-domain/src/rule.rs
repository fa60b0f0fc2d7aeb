//! Rule module

use crate::{Condition, FactValue};
use std::fmt;

/// The fact a rule concludes when it fires
#[derive(Debug, Clone, PartialEq)]
pub struct Conclusion {
    /// Name of the concluded fact
    pub fact: String,
    /// Value asserted for it
    pub value: FactValue,
}

impl Conclusion {
    /// Create a new conclusion
    pub fn new(fact: impl Into<String>, value: impl Into<FactValue>) -> Self {
        Self {
            fact: fact.into(),
            value: value.into(),
        }
    }
}

/// An inference rule: `IF c1 AND c2 ... THEN fact = value` with weight `cf`
///
/// Conditions are evaluated in order and short-circuit on the first failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Rule identifier
    pub id: String,

    /// Conjunction of conditions (non-empty for ingested rules)
    pub conditions: Vec<Condition>,

    /// What the rule concludes
    pub conclusion: Conclusion,

    /// Rule-level confidence weight [0.0, 1.0]
    pub cf: f64,

    /// Explanation recorded on the concluded fact
    pub explanation: String,
}

impl Rule {
    /// Create a new rule
    pub fn new(
        id: impl Into<String>,
        conditions: Vec<Condition>,
        conclusion: Conclusion,
        cf: f64,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            conditions,
            conclusion,
            cf,
            explanation: explanation.into(),
        }
    }

    /// Whether this rule concludes the named fact
    pub fn concludes(&self, fact: &str) -> bool {
        self.conclusion.fact == fact
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: IF ", self.id)?;
        for (idx, condition) in self.conditions.iter().enumerate() {
            if idx > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", condition)?;
        }
        write!(
            f,
            " THEN {} = {} (cf {:.2})",
            self.conclusion.fact, self.conclusion.value, self.cf
        )
    }
}
