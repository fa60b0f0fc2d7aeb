//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use certa_domain::certainty::format_percent;
use certa_domain::{Fact, FactValue, Provenance};
use certa_engine::{Explanation, LiteralConflict, PendingQuestion, Proof, ProofEngine, Shadowed};
use certa_kb::KbSummary;
use colored::*;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the list of provable goals.
    pub fn format_goals(&self, goals: &BTreeSet<String>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(goals)?),
            OutputFormat::Table => {
                if goals.is_empty() {
                    return Ok(self.colorize("No goals found.", "yellow"));
                }
                Ok(goals.iter().map(String::as_str).collect::<Vec<_>>().join("\n"))
            }
        }
    }

    /// Format the result of `check`.
    pub fn format_summary(&self, summary: &KbSummary) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(summary)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Questions", "Facts", "Rules", "Goals"]);
        builder.push_record([
            summary.questions.to_string(),
            summary.facts.to_string(),
            summary.rules.to_string(),
            summary.goals.len().to_string(),
        ]);

        let mut lines = vec![
            self.success("Knowledge base is valid"),
            self.table(builder),
        ];
        for name in &summary.unresolved {
            lines.push(self.warning(&format!(
                "'{}' is referenced but no question, fact or rule supplies it",
                name
            )));
        }
        Ok(lines.join("\n"))
    }

    /// Format the outcome of proving a goal.
    ///
    /// Mirrors the results panel: conclusion, total certainty, reasoning,
    /// deduced facts, user inputs and optionally the inference log.
    pub fn format_proof(
        &self,
        goal: &str,
        proof: &Proof,
        engine: &ProofEngine,
        show_trace: bool,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_proof_json(goal, proof, engine, show_trace),
            OutputFormat::Table => Ok(self.format_proof_table(goal, proof, engine, show_trace)),
        }
    }

    fn format_proof_json(
        &self,
        goal: &str,
        proof: &Proof,
        engine: &ProofEngine,
        show_trace: bool,
    ) -> Result<String> {
        let status = match proof {
            Proof::Proven { .. } => "proven",
            Proof::Unprovable => "unprovable",
            Proof::Suspended(_) => "suspended",
        };
        let conclusion = match proof {
            Proof::Proven { .. } => engine.facts().get(goal).map(fact_json),
            _ => None,
        };
        let pending = proof
            .pending()
            .map(|q| json!({ "fact": q.fact, "prompt": q.prompt }));
        let conflicts: Vec<Value> = engine.conflicts().iter().map(conflict_json).collect();

        let mut report = json!({
            "goal": goal,
            "mode": engine.config().reasoning.as_str(),
            "status": status,
            "cf": proof.as_cf(),
            "conclusion": conclusion,
            "pending": pending,
            "deduced": engine.facts().deduced().map(fact_json).collect::<Vec<_>>(),
            "elicited": engine.facts().elicited().map(fact_json).collect::<Vec<_>>(),
            "conflicts": conflicts,
        });
        if show_trace {
            report["trace"] = json!(engine.trace());
        }

        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn format_proof_table(
        &self,
        goal: &str,
        proof: &Proof,
        engine: &ProofEngine,
        show_trace: bool,
    ) -> String {
        let mut sections = vec![self.info(&format!(
            "Goal: {} ({} reasoning)",
            goal,
            engine.config().reasoning
        ))];

        match proof {
            Proof::Proven { cf } => {
                let explanation = engine.explain(goal);
                if let Explanation::Established {
                    name,
                    value,
                    explanation,
                    ..
                } = &explanation
                {
                    sections.push(self.success(&format!("Conclusion: {} is {}", name, value)));
                    sections.push(format!("Total certainty: {}", format_percent(*cf)));
                    sections.push(format!("Reasoning: {}", explanation));
                }
            }
            Proof::Unprovable => {
                sections.push(self.error(&engine.explain(goal).to_string()));
            }
            Proof::Suspended(question) => {
                sections.push(self.pending_question(question));
            }
        }

        for conflict in engine.conflicts() {
            sections.push(self.conflict(conflict));
        }

        let deduced: Vec<&Fact> = engine.facts().deduced().collect();
        if !deduced.is_empty() {
            sections.push(String::new());
            sections.push(self.colorize("Deduced facts", "cyan"));
            sections.push(self.facts_table(&deduced));
        }

        let elicited: Vec<&Fact> = engine.facts().elicited().collect();
        if !elicited.is_empty() {
            sections.push(String::new());
            sections.push(self.colorize("User inputs", "cyan"));
            sections.push(self.facts_table(&elicited));
        }

        if show_trace {
            sections.push(String::new());
            sections.push(self.format_trace(engine.trace()));
        }

        sections.join("\n")
    }

    /// Format working memory.
    pub fn format_facts(&self, engine: &ProofEngine) -> Result<String> {
        let facts: Vec<&Fact> = engine.facts().facts().collect();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &facts.iter().map(|f| fact_json(f)).collect::<Vec<_>>(),
            )?),
            OutputFormat::Table => {
                if facts.is_empty() {
                    return Ok(self.colorize("No facts established.", "yellow"));
                }
                Ok(self.facts_table(&facts))
            }
        }
    }

    /// Format an explanation report.
    pub fn format_explanation(&self, explanation: &Explanation) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = match explanation {
                    Explanation::Established {
                        name,
                        value,
                        cf,
                        explanation,
                        provenance,
                    } => json!({
                        "name": name,
                        "value": value_json(value),
                        "cf": cf,
                        "explanation": explanation,
                        "provenance": provenance_json(provenance),
                    }),
                    Explanation::NotProven { name } => json!({ "name": name, "proven": false }),
                };
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(explanation.to_string()),
        }
    }

    /// Format the inference log with step numbers.
    pub fn format_trace(&self, trace: &[String]) -> String {
        if trace.is_empty() {
            return self.colorize("Inference log is empty.", "yellow");
        }

        let mut lines = vec![self.colorize("Inference log", "cyan")];
        lines.extend(
            trace
                .iter()
                .enumerate()
                .map(|(idx, entry)| format!("{:>4}. {}", idx + 1, entry)),
        );
        lines.join("\n")
    }

    /// Format a question the engine is waiting on.
    pub fn pending_question(&self, question: &PendingQuestion) -> String {
        self.warning(&format!(
            "Awaiting input for '{}': {}",
            question.fact, question.prompt
        ))
    }

    /// Format a literal/fact name collision.
    pub fn conflict(&self, conflict: &LiteralConflict) -> String {
        self.warning(&format!(
            "Literal '{}' also names {}; compared against the literal",
            conflict.literal, conflict.shadowed
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn facts_table(&self, facts: &[&Fact]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Fact", "Value", "Certainty", "Source", "Explanation"]);

        for fact in facts {
            builder.push_record([
                fact.name.clone(),
                fact.value.to_string(),
                format_percent(fact.cf),
                source(&fact.provenance),
                fact.explanation.clone(),
            ]);
        }

        self.table(builder)
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn source(provenance: &Provenance) -> String {
    match provenance {
        Provenance::Derived { rule_id } => format!("rule {}", rule_id),
        other => other.label().to_string(),
    }
}

fn value_json(value: &FactValue) -> Value {
    match value {
        FactValue::Number(n) => json!(n),
        FactValue::Text(s) => json!(s),
    }
}

fn provenance_json(provenance: &Provenance) -> Value {
    match provenance {
        Provenance::Derived { rule_id } => json!({ "kind": "derived", "rule": rule_id }),
        other => json!({ "kind": other.label() }),
    }
}

fn fact_json(fact: &Fact) -> Value {
    json!({
        "name": fact.name,
        "value": value_json(&fact.value),
        "cf": fact.cf,
        "explanation": fact.explanation,
        "provenance": provenance_json(&fact.provenance),
    })
}

fn conflict_json(conflict: &LiteralConflict) -> Value {
    match &conflict.shadowed {
        Shadowed::Fact { value, provenance } => json!({
            "literal": conflict.literal,
            "shadows": "fact",
            "existing": value_json(value),
            "provenance": provenance_json(provenance),
        }),
        other => json!({
            "literal": conflict.literal,
            "shadows": other.label(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certa_domain::{Conclusion, Condition, KnowledgeBase, Operand, Operator, Rule};
    use certa_engine::{EngineConfig, MemoryOracle};

    fn flu_engine() -> (ProofEngine, MemoryOracle) {
        let mut kb = KnowledgeBase::new();
        kb.add_question("symptom_fever", "Do you have fever?");
        kb.add_rule(Rule::new(
            "R1",
            vec![Condition::new(
                Operand::parse("$symptom_fever"),
                Operator::Eq,
                Operand::parse("yes"),
            )],
            Conclusion::new("disease", "flu"),
            0.9,
            "Fever suggests flu",
        ));
        (
            ProofEngine::new(kb, EngineConfig::default()),
            MemoryOracle::new(),
        )
    }

    #[test]
    fn test_proven_table_report() {
        let (mut engine, mut oracle) = flu_engine();
        oracle.submit_value("symptom_fever", "yes");
        let proof = engine.prove_goal("disease", &mut oracle).unwrap();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_proof("disease", &proof, &engine, true).unwrap();
        assert!(output.contains("✓ Conclusion: disease is flu"));
        assert!(output.contains("Total certainty: 90.00%"));
        assert!(output.contains("Deduced facts"));
        assert!(output.contains("User inputs"));
        assert!(output.contains("rule R1"));
        assert!(output.contains("1. Trying to prove: disease"));
    }

    #[test]
    fn test_suspended_json_report() {
        let (mut engine, mut oracle) = flu_engine();
        let proof = engine.prove_goal("disease", &mut oracle).unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_proof("disease", &proof, &engine, false).unwrap();
        let report: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(report["status"], "suspended");
        assert_eq!(report["cf"], -1.0);
        assert_eq!(report["pending"]["fact"], "symptom_fever");
        assert!(report.get("trace").is_none());
    }

    #[test]
    fn test_goals_format() {
        let goals: BTreeSet<String> = ["b", "a"].iter().map(|s| s.to_string()).collect();
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.format_goals(&goals).unwrap(), "a\nb");
        assert!(formatter
            .format_goals(&BTreeSet::new())
            .unwrap()
            .contains("No goals found"));
    }

    #[test]
    fn test_empty_trace() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.format_trace(&[]), "Inference log is empty.");
    }

    #[test]
    fn test_conflict_reports() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let conflict = LiteralConflict {
            literal: "b".to_string(),
            shadowed: Shadowed::RuleConclusion,
        };
        assert_eq!(
            formatter.conflict(&conflict),
            "⚠ Literal 'b' also names a rule conclusion; compared against the literal"
        );
        assert_eq!(conflict_json(&conflict)["shadows"], "rule conclusion");

        let conflict = LiteralConflict {
            literal: "yes".to_string(),
            shadowed: Shadowed::Fact {
                value: FactValue::text("no"),
                provenance: Provenance::Given,
            },
        };
        let report = conflict_json(&conflict);
        assert_eq!(report["existing"], "no");
        assert_eq!(report["provenance"]["kind"], "given");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
