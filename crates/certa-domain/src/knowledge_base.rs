//! Knowledge base - the ingested, validated input of a session

use crate::{Fact, Rule};
use std::collections::{BTreeMap, BTreeSet};

/// Questions, given facts and rules for one session
///
/// Built once by ingestion and handed to the engine, which owns it for the rest
/// of the session. Rule order is document order and is significant: it decides
/// the sequence in which firings are OR-combined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    /// Question registry: fact name -> prompt text
    pub questions: BTreeMap<String, String>,

    /// Facts supplied directly by the knowledge base
    pub facts: Vec<Fact>,

    /// Rules in declaration order
    pub rules: Vec<Rule>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a question prompt for a fact
    pub fn add_question(&mut self, fact: impl Into<String>, prompt: impl Into<String>) {
        self.questions.insert(fact.into(), prompt.into());
    }

    /// Add a given fact
    pub fn add_fact(&mut self, fact: Fact) {
        self.facts.push(fact);
    }

    /// Append a rule, preserving declaration order
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Prompt text for a fact, if it is a registered question
    pub fn question(&self, fact: &str) -> Option<&str> {
        self.questions.get(fact).map(String::as_str)
    }

    /// Sorted, distinct names of facts concluded by some rule
    pub fn possible_goals(&self) -> BTreeSet<String> {
        self.rules
            .iter()
            .map(|rule| rule.conclusion.fact.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Conclusion, Condition, Operand, Operator};

    fn rule(id: &str, goal: &str) -> Rule {
        Rule::new(
            id,
            vec![Condition::new(
                Operand::parse("$x"),
                Operator::Eq,
                Operand::parse("1"),
            )],
            Conclusion::new(goal, "yes"),
            1.0,
            "",
        )
    }

    #[test]
    fn test_possible_goals_sorted_and_distinct() {
        let mut kb = KnowledgeBase::new();
        kb.add_rule(rule("R1", "disease"));
        kb.add_rule(rule("R2", "allergy"));
        kb.add_rule(rule("R3", "disease"));

        let goals: Vec<_> = kb.possible_goals().into_iter().collect();
        assert_eq!(goals, vec!["allergy".to_string(), "disease".to_string()]);
    }

    #[test]
    fn test_question_lookup() {
        let mut kb = KnowledgeBase::new();
        kb.add_question("symptom_fever", "Do you have fever?");
        assert_eq!(kb.question("symptom_fever"), Some("Do you have fever?"));
        assert_eq!(kb.question("age"), None);
    }
}
