//! Condition module - binary comparisons between operands

use crate::FactValue;
use std::fmt;

/// Prefix marking an operand as a reference to another fact
pub const REFERENCE_MARKER: char = '$';

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl Operator {
    /// Parse an operator token (`=` is accepted as an alias of `==`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            ">=" => Some(Operator::Ge),
            "<=" => Some(Operator::Le),
            "==" | "=" => Some(Operator::Eq),
            "!=" => Some(Operator::Ne),
            _ => None,
        }
    }

    /// Canonical token
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
        }
    }

    /// Apply the operator to two ordered values
    pub fn apply<T: PartialOrd + ?Sized>(&self, a: &T, b: &T) -> bool {
        match self {
            Operator::Gt => a > b,
            Operator::Lt => a < b,
            Operator::Ge => a >= b,
            Operator::Le => a <= b,
            Operator::Eq => a == b,
            Operator::Ne => a != b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One side of a condition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Reference to the fact with this name (written `$name`)
    Reference(String),
    /// Literal token, auto-asserted as a fact of the same name
    Literal(String),
}

impl Operand {
    /// Parse a knowledge-base token
    ///
    /// # Examples
    ///
    /// ```
    /// use certa_domain::Operand;
    ///
    /// assert_eq!(Operand::parse("$age"), Operand::Reference("age".to_string()));
    /// assert_eq!(Operand::parse("18"), Operand::Literal("18".to_string()));
    /// ```
    pub fn parse(token: &str) -> Self {
        match token.strip_prefix(REFERENCE_MARKER) {
            Some(name) => Operand::Reference(name.to_string()),
            None => Operand::Literal(token.to_string()),
        }
    }

    /// The fact name this operand resolves to
    pub fn name(&self) -> &str {
        match self {
            Operand::Reference(name) | Operand::Literal(name) => name,
        }
    }

    /// Whether the operand references another fact
    pub fn is_reference(&self) -> bool {
        matches!(self, Operand::Reference(_))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reference(name) => write!(f, "{}{}", REFERENCE_MARKER, name),
            Operand::Literal(token) => write!(f, "\"{}\"", token),
        }
    }
}

/// A binary comparison `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Left operand
    pub left: Operand,
    /// Comparison operator
    pub op: Operator,
    /// Right operand
    pub right: Operand,
}

impl Condition {
    /// Create a new condition
    pub fn new(left: Operand, op: Operator, right: Operand) -> Self {
        Self { left, op, right }
    }

    /// Whether at least one side references a fact
    ///
    /// Conditions between two literals can never need proof and are rejected at
    /// ingestion.
    pub fn has_reference(&self) -> bool {
        self.left.is_reference() || self.right.is_reference()
    }

    /// Compare two resolved values
    ///
    /// Both sides are compared as numbers when both coerce to finite numbers,
    /// otherwise as case-normalized strings. Never fails.
    pub fn evaluate(&self, left: &FactValue, right: &FactValue) -> bool {
        match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => self.op.apply(&a, &b),
            _ => self
                .op
                .apply(left.normalized().as_str(), right.normalized().as_str()),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(left: &str, op: &str, right: &str) -> Condition {
        Condition::new(
            Operand::parse(left),
            Operator::parse(op).unwrap(),
            Operand::parse(right),
        )
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!(Operator::parse(">="), Some(Operator::Ge));
        assert_eq!(Operator::parse("="), Some(Operator::Eq));
        assert_eq!(Operator::parse(" != "), Some(Operator::Ne));
        assert!(Operator::parse("=>").is_none());
    }

    #[test]
    fn test_numeric_comparison() {
        let c = cond("$age", ">=", "18");
        assert!(c.evaluate(&FactValue::Number(20.0), &FactValue::text("18")));
        assert!(!c.evaluate(&FactValue::Number(17.5), &FactValue::text("18")));
        // "9" < "18" numerically even though it sorts after lexically
        assert!(cond("$n", "<", "18").evaluate(&FactValue::text("9"), &FactValue::text("18")));
    }

    #[test]
    fn test_string_comparison_is_case_normalized() {
        let c = cond("$symptom_fever", "==", "yes");
        assert!(c.evaluate(&FactValue::text("YES"), &FactValue::text("yes")));
        assert!(!c.evaluate(&FactValue::text("no"), &FactValue::text("yes")));
        assert!(cond("$a", "!=", "b").evaluate(&FactValue::text("a"), &FactValue::text("b")));
    }

    #[test]
    fn test_mixed_falls_back_to_lexical() {
        let c = cond("$grade", ">", "b");
        assert!(c.evaluate(&FactValue::text("c"), &FactValue::text("b")));
        assert!(!cond("$x", "==", "1").evaluate(&FactValue::text("one"), &FactValue::Number(1.0)));
    }

    #[test]
    fn test_has_reference() {
        assert!(cond("$a", "==", "b").has_reference());
        assert!(cond("a", "==", "$b").has_reference());
        assert!(!cond("a", "==", "b").has_reference());
    }

    #[test]
    fn test_display() {
        assert_eq!(cond("$age", ">=", "18").to_string(), "$age >= \"18\"");
    }
}
