//! Static overview of a loaded knowledge base

use certa_domain::{KnowledgeBase, Operand};
use serde::Serialize;
use std::collections::BTreeSet;

/// Counts and reachability report used by `certa check`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KbSummary {
    /// Registered questions
    pub questions: usize,
    /// Given facts
    pub facts: usize,
    /// Rules
    pub rules: usize,
    /// Facts concluded by some rule
    pub goals: BTreeSet<String>,
    /// Referenced facts that no question, given fact or rule can supply
    pub unresolved: BTreeSet<String>,
}

impl KbSummary {
    /// Summarize a knowledge base
    pub fn of(kb: &KnowledgeBase) -> Self {
        let goals = kb.possible_goals();

        let unresolved = kb
            .rules
            .iter()
            .flat_map(|rule| rule.conditions.iter())
            .flat_map(|condition| [&condition.left, &condition.right])
            .filter_map(|operand| match operand {
                Operand::Reference(name) => Some(name),
                Operand::Literal(_) => None,
            })
            .filter(|name| {
                !goals.contains(*name)
                    && !kb.questions.contains_key(*name)
                    && !kb.facts.iter().any(|fact| &&fact.name == name)
            })
            .cloned()
            .collect();

        Self {
            questions: kb.questions.len(),
            facts: kb.facts.len(),
            rules: kb.rules.len(),
            goals,
            unresolved,
        }
    }

    /// Whether every reference can be supplied
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_from_str;

    #[test]
    fn test_unresolved_references() {
        let kb = load_from_str(
            r#"{
                "questions": {"fever": "Fever?"},
                "facts": [{"name": "age", "value": 30}],
                "rules": [
                    {"id": "R1", "conditions": [{"fact1": "$fever", "op": "==", "fact2": "yes"}], "conclusion": ["flu", "yes"]},
                    {"id": "R2", "conditions": [
                        {"fact1": "$flu", "op": "==", "fact2": "yes"},
                        {"fact1": "$age", "op": ">", "fact2": "$threshold"}
                    ], "conclusion": ["rest", "yes"]}
                ]
            }"#,
        )
        .unwrap();

        let summary = KbSummary::of(&kb);
        assert_eq!(summary.questions, 1);
        assert_eq!(summary.facts, 1);
        assert_eq!(summary.rules, 2);
        assert_eq!(summary.goals.len(), 2);
        assert_eq!(summary.unresolved.iter().collect::<Vec<_>>(), vec!["threshold"]);
        assert!(!summary.is_complete());
    }
}
