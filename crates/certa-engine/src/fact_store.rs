//! Fact store - working memory of a proof session

use certa_domain::certainty::combine_or;
use certa_domain::{Fact, FactValue, Provenance};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Mapping from fact name to its current value, confidence and provenance
///
/// Holds at most one fact per name. Facts are never retracted; asserting an
/// existing fact OR-combines the confidences.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    facts: HashMap<String, Fact>,
    order: Vec<String>,
}

impl FactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fact by name
    pub fn get(&self, name: &str) -> Option<&Fact> {
        self.facts.get(name)
    }

    /// Whether a fact with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.facts.contains_key(name)
    }

    /// Insert a fact as-is, bypassing confidence combination
    ///
    /// Only used for facts supplied directly by the knowledge base.
    pub fn initialize(&mut self, fact: Fact) {
        if !self.facts.contains_key(&fact.name) {
            self.order.push(fact.name.clone());
        }
        self.facts.insert(fact.name.clone(), fact);
    }

    /// Assert a fact, combining with any existing belief
    ///
    /// - New fact: inserted as given.
    /// - Existing fact: `cf = old + cf * (1 - old)`; the value is replaced only
    ///   when the incoming `cf` is strictly greater than the prior one. The
    ///   explanation and provenance always take the latest call's.
    pub fn assert(
        &mut self,
        name: &str,
        value: FactValue,
        cf: f64,
        explanation: impl Into<String>,
        provenance: Provenance,
    ) -> &Fact {
        let explanation = explanation.into();
        match self.facts.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                let fact = entry.into_mut();
                let prior = fact.cf;
                fact.cf = combine_or(prior, cf);
                if cf > prior {
                    fact.value = value;
                }
                fact.explanation = explanation;
                fact.provenance = provenance;
                fact
            }
            Entry::Vacant(entry) => {
                self.order.push(name.to_string());
                entry.insert(Fact {
                    name: name.to_string(),
                    value,
                    cf,
                    explanation,
                    provenance,
                })
            }
        }
    }

    /// All facts in the order they were first established
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.order.iter().filter_map(|name| self.facts.get(name))
    }

    /// Facts concluded by rule firings
    pub fn deduced(&self) -> impl Iterator<Item = &Fact> {
        self.facts()
            .filter(|fact| matches!(fact.provenance, Provenance::Derived { .. }))
    }

    /// Facts answered by the operator
    pub fn elicited(&self) -> impl Iterator<Item = &Fact> {
        self.facts()
            .filter(|fact| fact.provenance == Provenance::Elicited)
    }

    /// Number of facts
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(rule_id: &str) -> Provenance {
        Provenance::Derived {
            rule_id: rule_id.to_string(),
        }
    }

    #[test]
    fn test_assert_new_fact() {
        let mut store = FactStore::new();
        let fact = store.assert("disease", "flu".into(), 0.9, "fever", derived("R1"));
        assert_eq!(fact.cf, 0.9);
        assert_eq!(fact.value, FactValue::text("flu"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_assert_combines_confidence() {
        let mut store = FactStore::new();
        store.assert("disease", "flu".into(), 0.6, "first", derived("R1"));
        let fact = store.assert("disease", "cold".into(), 0.5, "second", derived("R2"));

        assert!((fact.cf - 0.8).abs() < 1e-12);
        // 0.5 is not above the prior 0.6, so the value stays
        assert_eq!(fact.value, FactValue::text("flu"));
        assert_eq!(fact.explanation, "second");
        assert_eq!(fact.provenance, derived("R2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_more_confident_assertion_replaces_value() {
        let mut store = FactStore::new();
        store.assert("disease", "flu".into(), 0.3, "first", derived("R1"));
        let fact = store.assert("disease", "cold".into(), 0.7, "second", derived("R2"));

        assert!((fact.cf - 0.79).abs() < 1e-12);
        assert_eq!(fact.value, FactValue::text("cold"));
    }

    #[test]
    fn test_initialize_bypasses_combination() {
        let mut store = FactStore::new();
        store.initialize(Fact::new("age", 30.0, 0.5, "given"));
        store.initialize(Fact::new("age", 31.0, 0.4, "given again"));

        let fact = store.get("age").unwrap();
        assert_eq!(fact.cf, 0.4);
        assert_eq!(fact.value, FactValue::Number(31.0));
        assert_eq!(store.facts().count(), 1);
    }

    #[test]
    fn test_filters_keep_establishment_order() {
        let mut store = FactStore::new();
        store.initialize(Fact::new("given", 1.0, 1.0, "given"));
        store.assert("b", "x".into(), 1.0, "", derived("R2"));
        store.assert("fever", "yes".into(), 1.0, "", Provenance::Elicited);
        store.assert("a", "y".into(), 1.0, "", derived("R1"));

        let deduced: Vec<_> = store.deduced().map(|f| f.name.as_str()).collect();
        assert_eq!(deduced, vec!["b", "a"]);

        let elicited: Vec<_> = store.elicited().map(|f| f.name.as_str()).collect();
        assert_eq!(elicited, vec!["fever"]);
    }
}
