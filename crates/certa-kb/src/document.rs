//! Serialized knowledge-base document
//!
//! Mirrors the JSON exchange format. Members whose type varies between
//! documents (values, operands, confidences) are kept as raw JSON and
//! interpreted by the loader.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level document; absent members are empty and unknown members ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeDocument {
    /// Fact name -> prompt text
    #[serde(default)]
    pub questions: BTreeMap<String, String>,

    /// Given facts
    #[serde(default)]
    pub facts: Vec<FactEntry>,

    /// Rules in firing order
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// A given fact as written in the document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FactEntry {
    /// Fact name
    pub name: Option<String>,
    /// String, number or boolean
    pub value: Option<Value>,
    /// Confidence (number or numeric string)
    pub cf: Option<Value>,
    /// Explanation shown for the fact
    pub explanation: Option<String>,
}

/// A rule as written in the document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleEntry {
    /// Rule id
    pub id: Option<String>,
    /// Conjunctive conditions
    pub conditions: Option<Vec<ConditionEntry>>,
    /// `[fact_name, value]`
    pub conclusion: Option<Vec<Value>>,
    /// Confidence (number or numeric string)
    pub cf: Option<Value>,
    /// Explanation recorded on the concluded fact
    pub explanation: Option<String>,
}

/// A condition as written in the document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionEntry {
    /// Left operand (`$name` or a literal)
    pub fact1: Option<Value>,
    /// Comparison operator
    pub op: Option<String>,
    /// Right operand (`$name` or a literal)
    pub fact2: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_members_are_empty() {
        let doc: KnowledgeDocument = serde_json::from_str(r#"{"title": "ignored"}"#).unwrap();
        assert!(doc.questions.is_empty());
        assert!(doc.facts.is_empty());
        assert!(doc.rules.is_empty());
    }

    #[test]
    fn test_flexible_members_stay_raw() {
        let doc: KnowledgeDocument = serde_json::from_str(
            r#"{
                "rules": [
                    {
                        "id": "R1",
                        "conditions": [{"fact1": "$age", "op": ">=", "fact2": 18}],
                        "conclusion": ["status", "adult"],
                        "cf": "0.8"
                    }
                ]
            }"#,
        )
        .unwrap();

        let rule = &doc.rules[0];
        let conditions = rule.conditions.as_ref().unwrap();
        assert_eq!(conditions[0].fact2, Some(Value::from(18)));
        assert_eq!(rule.cf, Some(Value::from("0.8")));
        assert!(rule.explanation.is_none());
    }
}
