//! Fact module - the unit of working memory

use std::fmt;

/// The value carried by a fact
///
/// Knowledge bases mix numeric and textual values freely, so comparisons
/// coerce at evaluation time (see [`crate::Condition::evaluate`]).
#[derive(Debug, Clone, PartialEq)]
pub enum FactValue {
    /// Numeric value
    Number(f64),
    /// Textual value
    Text(String),
}

impl FactValue {
    /// Create a textual value
    pub fn text(s: impl Into<String>) -> Self {
        FactValue::Text(s.into())
    }

    /// Normalize a raw user answer
    ///
    /// Numeric input becomes a number; anything else becomes trimmed, lowercased
    /// text.
    ///
    /// # Examples
    ///
    /// ```
    /// use certa_domain::FactValue;
    ///
    /// assert_eq!(FactValue::from_answer(" 20 "), FactValue::Number(20.0));
    /// assert_eq!(FactValue::from_answer(" Yes"), FactValue::text("yes"));
    /// ```
    pub fn from_answer(raw: &str) -> Self {
        match parse_number(raw) {
            Some(n) => FactValue::Number(n),
            None => FactValue::Text(raw.trim().to_lowercase()),
        }
    }

    /// Numeric view of the value, if it has one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FactValue::Number(n) if n.is_finite() => Some(*n),
            FactValue::Number(_) => None,
            FactValue::Text(s) => parse_number(s),
        }
    }

    /// Case-normalized string view used for non-numeric comparison
    pub fn normalized(&self) -> String {
        self.to_string().trim().to_lowercase()
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Number(n) => write!(f, "{}", n),
            FactValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FactValue {
    fn from(n: f64) -> Self {
        FactValue::Number(n)
    }
}

impl From<&str> for FactValue {
    fn from(s: &str) -> Self {
        FactValue::Text(s.to_string())
    }
}

impl From<String> for FactValue {
    fn from(s: String) -> Self {
        FactValue::Text(s)
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// How a fact was established
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Supplied directly by the knowledge base
    Given,
    /// Concluded by a rule firing
    Derived {
        /// Identifier of the last rule that concluded the fact
        rule_id: String,
    },
    /// Answered by the operator through the answer oracle
    Elicited,
    /// Auto-asserted from a literal operand
    Implied,
}

impl Provenance {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Given => "given",
            Provenance::Derived { .. } => "derived",
            Provenance::Elicited => "elicited",
            Provenance::Implied => "implied",
        }
    }
}

/// A fact held in working memory
///
/// At most one fact per name exists in a store; re-deriving a fact updates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    /// Fact name (the key)
    pub name: String,

    /// Current value
    pub value: FactValue,

    /// Certainty factor [0.0, 1.0]
    pub cf: f64,

    /// Human-readable account of how the fact was established
    pub explanation: String,

    /// Machine-readable origin
    pub provenance: Provenance,
}

impl Fact {
    /// Create a given fact
    pub fn new(
        name: impl Into<String>,
        value: impl Into<FactValue>,
        cf: f64,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            cf,
            explanation: explanation.into(),
            provenance: Provenance::Given,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_normalization() {
        assert_eq!(FactValue::from_answer("3.5"), FactValue::Number(3.5));
        assert_eq!(FactValue::from_answer("  FLU "), FactValue::text("flu"));
        assert_eq!(FactValue::from_answer("inf"), FactValue::text("inf"));
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(FactValue::text(" 18 ").as_number(), Some(18.0));
        assert_eq!(FactValue::text("eighteen").as_number(), None);
        assert_eq!(FactValue::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FactValue::Number(20.0).to_string(), "20");
        assert_eq!(FactValue::Number(0.5).to_string(), "0.5");
        assert_eq!(FactValue::text("Flu").normalized(), "flu");
    }

    #[test]
    fn test_fact_defaults_to_given() {
        let fact = Fact::new("age", 42.0, 1.0, "given");
        assert_eq!(fact.provenance, Provenance::Given);
        assert_eq!(Provenance::Elicited.label(), "elicited");
    }
}
