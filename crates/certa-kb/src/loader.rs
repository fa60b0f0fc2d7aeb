//! Build a validated knowledge base from a JSON document

use crate::document::{ConditionEntry, FactEntry, KnowledgeDocument, RuleEntry};
use crate::error::KbError;
use certa_domain::certainty::{self, CERTAIN};
use certa_domain::{Conclusion, Condition, Fact, FactValue, KnowledgeBase, Operand, Operator, Rule};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Explanation given to facts that do not carry one
pub const DEFAULT_FACT_EXPLANATION: &str = "Given";

/// Load a knowledge base from a JSON file
pub fn load_from_path(path: impl AsRef<Path>) -> Result<KnowledgeBase, KbError> {
    let path = path.as_ref();
    debug!("Reading knowledge base from {}", path.display());
    let json = fs::read_to_string(path)
        .map_err(|e| KbError::Io(format!("{}: {}", path.display(), e)))?;
    load_from_str(&json)
}

/// Load a knowledge base from JSON text
pub fn load_from_str(json: &str) -> Result<KnowledgeBase, KbError> {
    let document: KnowledgeDocument = serde_json::from_str(json)?;
    build(document)
}

/// Validate a parsed document and convert it
///
/// Population order is questions, then given facts, then rules in document
/// order. Nothing is returned unless every entry is valid.
pub fn build(document: KnowledgeDocument) -> Result<KnowledgeBase, KbError> {
    let mut kb = KnowledgeBase::new();

    for (fact, prompt) in document.questions {
        kb.add_question(fact, prompt);
    }

    let mut seen_facts = HashSet::new();
    for (idx, entry) in document.facts.into_iter().enumerate() {
        let fact = parse_fact(idx, entry)?;
        if !seen_facts.insert(fact.name.clone()) {
            warn!("Fact '{}' is given more than once; the last entry wins", fact.name);
        }
        kb.add_fact(fact);
    }

    let mut seen_rules = HashSet::new();
    for (idx, entry) in document.rules.into_iter().enumerate() {
        let rule = parse_rule(idx, entry)?;
        if !seen_rules.insert(rule.id.clone()) {
            return Err(KbError::DuplicateRuleId(rule.id));
        }
        kb.add_rule(rule);
    }

    info!(
        "Loaded knowledge base: {} question(s), {} fact(s), {} rule(s)",
        kb.questions.len(),
        kb.facts.len(),
        kb.rules.len()
    );
    Ok(kb)
}

fn parse_fact(idx: usize, entry: FactEntry) -> Result<Fact, KbError> {
    let context = format!("fact #{}", idx);
    let name = entry
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| missing(&context, "name"))?;
    let value = entry.value.ok_or_else(|| missing(&context, "value"))?;
    let value = fact_value(&value)
        .ok_or_else(|| KbError::InvalidFact(format!("'{}' has an unsupported value {}", name, value)))?;
    let cf = parse_cf(entry.cf.as_ref(), &format!("fact '{}'", name));
    let explanation = entry
        .explanation
        .unwrap_or_else(|| DEFAULT_FACT_EXPLANATION.to_string());

    Ok(Fact::new(name, value, cf, explanation))
}

fn parse_rule(idx: usize, entry: RuleEntry) -> Result<Rule, KbError> {
    let id = entry
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| missing(&format!("rule #{}", idx), "id"))?;
    let context = format!("rule '{}'", id);

    let conditions = entry
        .conditions
        .ok_or_else(|| missing(&context, "conditions"))?;
    if conditions.is_empty() {
        return Err(invalid_rule(&id, "a rule needs at least one condition"));
    }
    let conditions = conditions
        .into_iter()
        .map(|condition| parse_condition(&id, condition))
        .collect::<Result<Vec<_>, _>>()?;

    let conclusion = entry
        .conclusion
        .ok_or_else(|| missing(&context, "conclusion"))?;
    let conclusion = parse_conclusion(&id, &conclusion)?;

    let cf = parse_cf(entry.cf.as_ref(), &context);
    let explanation = entry
        .explanation
        .unwrap_or_else(|| format!("Concluded by rule {}", id));

    Ok(Rule::new(id, conditions, conclusion, cf, explanation))
}

fn parse_condition(rule: &str, entry: ConditionEntry) -> Result<Condition, KbError> {
    let context = format!("a condition of rule '{}'", rule);
    let left = entry.fact1.ok_or_else(|| missing(&context, "fact1"))?;
    let op = entry.op.ok_or_else(|| missing(&context, "op"))?;
    let right = entry.fact2.ok_or_else(|| missing(&context, "fact2"))?;

    let op_parsed = Operator::parse(&op).ok_or_else(|| KbError::InvalidOperator {
        rule: rule.to_string(),
        op: op.clone(),
    })?;
    let condition = Condition::new(operand(rule, &left)?, op_parsed, operand(rule, &right)?);

    if !condition.has_reference() {
        return Err(invalid_rule(
            rule,
            &format!("condition {} compares two literals", condition),
        ));
    }
    Ok(condition)
}

fn parse_conclusion(rule: &str, conclusion: &[Value]) -> Result<Conclusion, KbError> {
    let (fact, value) = match conclusion {
        [fact, value] => (fact, value),
        _ => {
            return Err(invalid_rule(
                rule,
                "conclusion must be a [fact_name, value] pair",
            ))
        }
    };

    let fact = fact
        .as_str()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| invalid_rule(rule, "conclusion fact name must be a non-empty string"))?;
    let value = fact_value(value)
        .ok_or_else(|| invalid_rule(rule, &format!("unsupported conclusion value {}", value)))?;

    Ok(Conclusion::new(fact, value))
}

/// Operand token: strings as written, numbers and booleans by their JSON text
fn operand(rule: &str, value: &Value) -> Result<Operand, KbError> {
    let token = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            return Err(invalid_rule(
                rule,
                &format!("unsupported operand {}", other),
            ))
        }
    };

    let operand = Operand::parse(&token);
    if operand.name().is_empty() {
        return Err(invalid_rule(rule, "empty operand"));
    }
    Ok(operand)
}

fn fact_value(value: &Value) -> Option<FactValue> {
    match value {
        Value::String(s) => Some(FactValue::text(s.as_str())),
        Value::Number(n) => n.as_f64().map(FactValue::Number),
        Value::Bool(b) => Some(FactValue::text(b.to_string())),
        _ => None,
    }
}

/// Confidence with lenient coercion
///
/// Absent or non-numeric values mean full certainty; numeric strings are
/// accepted; out-of-range numbers are clamped into [0, 1].
fn parse_cf(value: Option<&Value>, context: &str) -> f64 {
    let raw = match value {
        None | Some(Value::Null) => return CERTAIN,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match raw {
        Some(cf) if certainty::is_valid(cf) => cf,
        Some(cf) => {
            let clamped = certainty::clamp(cf);
            warn!("{}: cf {} out of range, clamped to {}", context, cf, clamped);
            clamped
        }
        None => {
            warn!("{}: cf is not numeric, using {}", context, CERTAIN);
            CERTAIN
        }
    }
}

fn missing(context: &str, field: &str) -> KbError {
    KbError::MissingField {
        context: context.to_string(),
        field: field.to_string(),
    }
}

fn invalid_rule(rule: &str, reason: &str) -> KbError {
    KbError::InvalidRule {
        rule: rule.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_document() {
        let kb = load_from_str(
            r#"{
                "questions": {"symptom_fever": "Do you have fever?"},
                "facts": [{"name": "age", "value": 20, "explanation": "From the form"}],
                "rules": [
                    {
                        "id": "R1",
                        "conditions": [{"fact1": "$symptom_fever", "op": "==", "fact2": "yes"}],
                        "conclusion": ["disease", "flu"],
                        "cf": 0.9,
                        "explanation": "Fever suggests flu"
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(kb.question("symptom_fever"), Some("Do you have fever?"));
        assert_eq!(kb.facts[0].value, FactValue::Number(20.0));
        assert_eq!(kb.facts[0].cf, 1.0);
        assert_eq!(kb.rules[0].cf, 0.9);
        assert_eq!(kb.rules[0].conclusion, Conclusion::new("disease", "flu"));
        assert_eq!(
            kb.rules[0].conditions[0].left,
            Operand::Reference("symptom_fever".to_string())
        );
    }

    #[test]
    fn test_cf_coercion() {
        assert_eq!(parse_cf(None, "test"), 1.0);
        assert_eq!(parse_cf(Some(&Value::Null), "test"), 1.0);
        assert_eq!(parse_cf(Some(&Value::from("0.8")), "test"), 0.8);
        assert_eq!(parse_cf(Some(&Value::from("high")), "test"), 1.0);
        assert_eq!(parse_cf(Some(&Value::from(1.5)), "test"), 1.0);
        assert_eq!(parse_cf(Some(&Value::from(-0.2)), "test"), 0.0);
        assert_eq!(parse_cf(Some(&Value::from(true)), "test"), 1.0);
    }

    #[test]
    fn test_numeric_and_boolean_operands() {
        assert_eq!(
            operand("R1", &Value::from(18)).unwrap(),
            Operand::Literal("18".to_string())
        );
        assert_eq!(
            operand("R1", &Value::from(false)).unwrap(),
            Operand::Literal("false".to_string())
        );
        assert!(operand("R1", &Value::from("$")).is_err());
        assert!(operand("R1", &Value::Null).is_err());
    }

    #[test]
    fn test_boolean_fact_becomes_text() {
        assert_eq!(fact_value(&Value::from(true)), Some(FactValue::text("true")));
        assert_eq!(fact_value(&Value::Array(vec![])), None);
    }

    #[test]
    fn test_equals_alias() {
        let kb = load_from_str(
            r#"{"rules": [{"id": "R1", "conditions": [{"fact1": "$a", "op": "=", "fact2": "b"}], "conclusion": ["c", "d"]}]}"#,
        )
        .unwrap();
        assert_eq!(kb.rules[0].conditions[0].op, Operator::Eq);
        assert_eq!(kb.rules[0].explanation, "Concluded by rule R1");
    }

    #[test]
    fn test_missing_fact_value() {
        let err = load_from_str(r#"{"facts": [{"name": "age"}]}"#).unwrap_err();
        assert!(matches!(err, KbError::MissingField { ref field, .. } if field == "value"));
    }

    #[test]
    fn test_rule_errors() {
        let cases = [
            (
                r#"{"rules": [{"id": "R1", "conditions": [], "conclusion": ["a", "b"]}]}"#,
                "at least one condition",
            ),
            (
                r#"{"rules": [{"id": "R1", "conditions": [{"fact1": "1", "op": "<", "fact2": "2"}], "conclusion": ["a", "b"]}]}"#,
                "two literals",
            ),
            (
                r#"{"rules": [{"id": "R1", "conditions": [{"fact1": "$x", "op": "==", "fact2": "y"}], "conclusion": ["a"]}]}"#,
                "pair",
            ),
        ];

        for (json, expected) in cases {
            let err = load_from_str(json).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "'{}' should mention '{}'",
                err,
                expected
            );
        }
    }

    #[test]
    fn test_invalid_operator() {
        let err = load_from_str(
            r#"{"rules": [{"id": "R1", "conditions": [{"fact1": "$x", "op": "=~", "fact2": "y"}], "conclusion": ["a", "b"]}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid operator '=~' in rule 'R1'");
    }

    #[test]
    fn test_duplicate_rule_id() {
        let rule = r#"{"id": "R1", "conditions": [{"fact1": "$x", "op": "==", "fact2": "y"}], "conclusion": ["a", "b"]}"#;
        let json = format!(r#"{{"rules": [{}, {}]}}"#, rule, rule);
        assert!(matches!(
            load_from_str(&json),
            Err(KbError::DuplicateRuleId(id)) if id == "R1"
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(load_from_str("{ not json"), Err(KbError::JsonParse(_))));
        assert!(matches!(load_from_str("42"), Err(KbError::JsonParse(_))));
    }
}
