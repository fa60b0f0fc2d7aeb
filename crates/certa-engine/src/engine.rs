//! Proof engine - recursive backward chaining with certainty factors
//!
//! Proof never parks a stack frame. When a required answer is missing the whole
//! search returns [`Proof::Suspended`]; the caller records the answer in its
//! oracle and calls [`ProofEngine::prove_goal`] again. Facts settled on the
//! previous pass short-circuit immediately, so the re-walk only pays for the
//! subgoals that became resolvable.

use crate::{EngineConfig, EngineError, Explanation, FactStore, ProofCache, ProofStats, ReasoningMode};
use certa_domain::certainty::{self, CERTAIN};
use certa_domain::{AnswerOracle, FactValue, KnowledgeBase, Operand, Provenance, Rule};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::{self, Display};
use std::sync::Arc;

/// Explanation recorded on facts auto-asserted from literal operands
pub const IMPLIED_EXPLANATION: &str = "implied by knowledge base";

/// Explanation recorded on facts answered by the operator
pub const ELICITED_EXPLANATION: &str = "elicited from user";

/// A question the presentation layer must put to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    /// Fact the answer is for
    pub fact: String,
    /// Prompt text from the question registry
    pub prompt: String,
}

/// Outcome of proving a goal
#[derive(Debug, Clone, PartialEq)]
pub enum Proof {
    /// Goal holds with this confidence (0, 1]
    Proven {
        /// Combined confidence
        cf: f64,
    },

    /// No supporting evidence with the current knowledge
    Unprovable,

    /// More evidence is needed; prove again once the question is answered
    Suspended(PendingQuestion),
}

impl Proof {
    fn from_cf(cf: f64) -> Self {
        if cf > 0.0 {
            Proof::Proven { cf }
        } else {
            Proof::Unprovable
        }
    }

    /// Confidence of a proven goal
    pub fn cf(&self) -> Option<f64> {
        match self {
            Proof::Proven { cf } => Some(*cf),
            _ => None,
        }
    }

    /// Scalar view: the confidence, `0.0` when unprovable, `-1.0` when suspended
    pub fn as_cf(&self) -> f64 {
        match self {
            Proof::Proven { cf } => *cf,
            Proof::Unprovable => 0.0,
            Proof::Suspended(_) => -1.0,
        }
    }

    /// Whether the goal was proven
    pub fn is_proven(&self) -> bool {
        matches!(self, Proof::Proven { .. })
    }

    /// Whether the proof is waiting for an answer
    pub fn is_suspended(&self) -> bool {
        matches!(self, Proof::Suspended(_))
    }

    /// The question blocking the proof, if suspended
    pub fn pending(&self) -> Option<&PendingQuestion> {
        match self {
            Proof::Suspended(question) => Some(question),
            _ => None,
        }
    }
}

/// A literal operand whose token names a fact established some other way
///
/// The literal is compared by its own value. It is never asserted under a
/// name the knowledge base can establish, and an existing fact is left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralConflict {
    /// The literal token (and colliding fact name)
    pub literal: String,
    /// What the token collided with
    pub shadowed: Shadowed,
}

/// The other side of a [`LiteralConflict`]
#[derive(Debug, Clone, PartialEq)]
pub enum Shadowed {
    /// A fact already in working memory
    Fact {
        /// Value of the existing fact
        value: FactValue,
        /// How the existing fact was established
        provenance: Provenance,
    },

    /// A rule conclusion that has not been derived yet
    RuleConclusion,

    /// A registered question that has not been answered yet
    Question,
}

impl Shadowed {
    /// Short label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Shadowed::Fact { provenance, .. } => provenance.label(),
            Shadowed::RuleConclusion => "rule conclusion",
            Shadowed::Question => "question",
        }
    }
}

impl fmt::Display for Shadowed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shadowed::Fact { value, provenance } => {
                write!(f, "existing {} fact with value {}", provenance.label(), value)
            }
            Shadowed::RuleConclusion => write!(f, "a rule conclusion"),
            Shadowed::Question => write!(f, "a registered question"),
        }
    }
}

/// How a condition operand resolved
enum Resolution {
    Resolved { value: FactValue, cf: f64 },
    Missing,
    Suspended(PendingQuestion),
}

/// A rule firing waiting to be committed
struct Firing<'r> {
    rule: &'r Rule,
    cf: f64,
}

/// Backward-chaining proof engine over one knowledge base
///
/// Owns the fact store, the proof cache and the trace log for one session.
/// The answer oracle is injected per call.
///
/// # Examples
///
/// ```
/// use certa_domain::{Conclusion, Condition, KnowledgeBase, Operand, Operator, Rule};
/// use certa_engine::{EngineConfig, MemoryOracle, Proof, ProofEngine};
///
/// let mut kb = KnowledgeBase::new();
/// kb.add_question("symptom_fever", "Do you have fever?");
/// kb.add_rule(Rule::new(
///     "R1",
///     vec![Condition::new(Operand::parse("$symptom_fever"), Operator::Eq, Operand::parse("yes"))],
///     Conclusion::new("disease", "flu"),
///     0.9,
///     "Fever suggests flu",
/// ));
///
/// let mut engine = ProofEngine::new(kb, EngineConfig::default());
/// let mut oracle = MemoryOracle::new();
///
/// let first = engine.prove_goal("disease", &mut oracle).unwrap();
/// assert!(first.is_suspended());
///
/// oracle.submit_value("symptom_fever", "yes");
/// let second = engine.prove_goal("disease", &mut oracle).unwrap();
/// assert_eq!(second, Proof::Proven { cf: 0.9 });
/// ```
pub struct ProofEngine {
    config: EngineConfig,
    rules: Arc<[Rule]>,
    questions: BTreeMap<String, String>,
    facts: FactStore,
    cache: ProofCache,
    trace: Vec<String>,
    conflicts: Vec<LiteralConflict>,
    stats: ProofStats,
    in_progress: HashSet<String>,
    cuts: usize,
}

impl ProofEngine {
    /// Build an engine from an ingested knowledge base
    ///
    /// Given facts are initialized without confidence combination.
    pub fn new(knowledge_base: KnowledgeBase, config: EngineConfig) -> Self {
        let KnowledgeBase {
            questions,
            facts: given,
            rules,
        } = knowledge_base;

        let mut facts = FactStore::new();
        for fact in given {
            facts.initialize(fact);
        }

        tracing::info!(
            "Proof engine ready: {} question(s), {} fact(s), {} rule(s), {} reasoning",
            questions.len(),
            facts.len(),
            rules.len(),
            config.reasoning
        );

        Self {
            config,
            rules: rules.into(),
            questions,
            facts,
            cache: ProofCache::new(),
            trace: Vec::new(),
            conflicts: Vec::new(),
            stats: ProofStats::new(),
            in_progress: HashSet::new(),
            cuts: 0,
        }
    }

    /// Prove a goal, consulting the oracle for missing evidence
    ///
    /// Returns [`Proof::Suspended`] when an answer is missing; nothing is asserted
    /// for the goal or any ancestor in that case. Errors only when the oracle
    /// itself fails.
    pub fn prove_goal<O>(&mut self, goal: &str, oracle: &mut O) -> Result<Proof, EngineError>
    where
        O: AnswerOracle,
        O::Error: Display,
    {
        self.stats.passes += 1;
        self.in_progress.clear();

        let proof = self.prove(goal, oracle, 0)?;
        match &proof {
            Proof::Proven { cf } => tracing::info!("Goal '{}' proven with cf {:.2}", goal, cf),
            Proof::Unprovable => tracing::info!("Goal '{}' could not be proven", goal),
            Proof::Suspended(question) => {
                self.stats.suspensions += 1;
                tracing::info!("Goal '{}' suspended awaiting '{}'", goal, question.fact);
            }
        }
        Ok(proof)
    }

    fn prove<O>(&mut self, goal: &str, oracle: &mut O, depth: usize) -> Result<Proof, EngineError>
    where
        O: AnswerOracle,
        O::Error: Display,
    {
        if let Some(fact) = self.facts.get(goal) {
            self.stats.memo_hits += 1;
            return Ok(Proof::from_cf(fact.cf));
        }
        if let Some(settled) = self.cache.get(goal) {
            self.stats.memo_hits += 1;
            return Ok(settled.into());
        }
        if self.in_progress.contains(goal) {
            tracing::warn!("Cycle detected while proving '{}'", goal);
            self.log(format!("Cycle detected at: {}", goal));
            self.cuts += 1;
            return Ok(Proof::Unprovable);
        }
        if depth > self.config.max_depth {
            tracing::warn!(
                "Depth limit {} reached at '{}'; treating branch as unprovable",
                self.config.max_depth,
                goal
            );
            self.log(format!("Depth limit reached at: {}", goal));
            self.cuts += 1;
            return Ok(Proof::Unprovable);
        }

        tracing::debug!("Trying to prove '{}' (depth {})", goal, depth);
        self.log(format!("Trying to prove: {}", goal));
        self.stats.attempts += 1;

        let cuts_before = self.cuts;
        self.in_progress.insert(goal.to_string());
        let proof = self.search(goal, oracle, depth);
        self.in_progress.remove(goal);
        let proof = proof?;

        // Firings that did happen stay committed; only the outcome of a goal
        // shaped by a cycle or depth cut is kept out of the cache
        if self.cuts == cuts_before {
            self.cache.record(goal, &proof);
        }
        Ok(proof)
    }

    /// Steps 3-6: rules, then the question registry, then give up
    fn search<O>(&mut self, goal: &str, oracle: &mut O, depth: usize) -> Result<Proof, EngineError>
    where
        O: AnswerOracle,
        O::Error: Display,
    {
        let rules = Arc::clone(&self.rules);
        let mut firings = Vec::new();

        'rules: for rule in rules.iter().filter(|rule| rule.concludes(goal)) {
            let mut condition_cfs = Vec::with_capacity(rule.conditions.len());

            for condition in &rule.conditions {
                let (left, left_cf) = match self.resolve(&condition.left, oracle, depth)? {
                    Resolution::Resolved { value, cf } => (value, cf),
                    Resolution::Suspended(question) => return Ok(Proof::Suspended(question)),
                    Resolution::Missing => continue 'rules,
                };
                let (right, right_cf) = match self.resolve(&condition.right, oracle, depth)? {
                    Resolution::Resolved { value, cf } => (value, cf),
                    Resolution::Suspended(question) => return Ok(Proof::Suspended(question)),
                    Resolution::Missing => continue 'rules,
                };

                let cf = left_cf.min(right_cf);
                if cf <= 0.0 || !condition.evaluate(&left, &right) {
                    tracing::debug!("Rule '{}' failed on {}", rule.id, condition);
                    continue 'rules;
                }
                condition_cfs.push(cf);
            }

            let condition_cf = certainty::combine_and(condition_cfs).unwrap_or(CERTAIN);
            firings.push(Firing {
                rule,
                cf: certainty::attenuate(rule.cf, condition_cf),
            });
        }

        if !firings.is_empty() {
            return Ok(self.commit(goal, &firings));
        }

        if let Some(prompt) = self.questions.get(goal).cloned() {
            return self.elicit(goal, prompt, oracle);
        }

        tracing::debug!("No rule or question for '{}'", goal);
        Ok(Proof::Unprovable)
    }

    /// Assert buffered firings in declaration order
    ///
    /// Runs only once every rule for the goal was tried without suspension, so
    /// a suspended pass never leaves a partial conclusion behind. The goal has
    /// no fact yet, so its confidence is the OR fold of the firings. Firings
    /// are committed even when a cut shaped the search: in a cyclic knowledge
    /// base the stored facts can depend on which goal was proven first.
    fn commit(&mut self, goal: &str, firings: &[Firing<'_>]) -> Proof {
        for firing in firings {
            let rule = firing.rule;
            self.facts.assert(
                goal,
                rule.conclusion.value.clone(),
                firing.cf,
                rule.explanation.clone(),
                Provenance::Derived {
                    rule_id: rule.id.clone(),
                },
            );
            self.stats.firings += 1;
            tracing::info!(
                "Rule '{}' fired: {} is {} (cf {:.2})",
                rule.id,
                goal,
                rule.conclusion.value,
                firing.cf
            );
            self.log(format!(
                "Rule '{}' has fired --> {} is {} (cf {:.2})",
                rule.id, goal, rule.conclusion.value, firing.cf
            ));
        }

        let cf = certainty::combine_all_or(firings.iter().map(|firing| firing.cf))
            .unwrap_or(certainty::NONE);
        debug_assert!(
            self.facts
                .get(goal)
                .is_some_and(|fact| (fact.cf - cf).abs() < 1e-12),
            "goal '{}' had a fact before its rules were committed",
            goal
        );
        Proof::from_cf(cf)
    }

    /// Step 5: take the answer from the oracle or ask for it
    fn elicit<O>(&mut self, goal: &str, prompt: String, oracle: &mut O) -> Result<Proof, EngineError>
    where
        O: AnswerOracle,
        O::Error: Display,
    {
        let answer = if oracle.has_answer(goal) {
            oracle
                .answer(goal)
                .map_err(|e| EngineError::Oracle(e.to_string()))?
        } else {
            None
        };

        match answer.filter(|answer| !answer.is_blank()) {
            Some(answer) => {
                let value = FactValue::from_answer(&answer.raw);
                let cf = match self.config.reasoning {
                    ReasoningMode::Deductive => CERTAIN,
                    ReasoningMode::Approximate => answer.effective_weight(),
                };
                tracing::info!("Elicited '{}' = {} (cf {:.2})", goal, value, cf);
                self.log(format!("User input: {} is {} (cf {:.2})", goal, value, cf));
                let fact =
                    self.facts
                        .assert(goal, value, cf, ELICITED_EXPLANATION, Provenance::Elicited);
                let cf = fact.cf;
                self.stats.elicited += 1;
                Ok(Proof::from_cf(cf))
            }
            None => {
                oracle.request_answer(goal, &prompt);
                self.log(format!("Awaiting input for: {}", goal));
                Ok(Proof::Suspended(PendingQuestion {
                    fact: goal.to_string(),
                    prompt,
                }))
            }
        }
    }

    fn resolve<O>(
        &mut self,
        operand: &Operand,
        oracle: &mut O,
        depth: usize,
    ) -> Result<Resolution, EngineError>
    where
        O: AnswerOracle,
        O::Error: Display,
    {
        match operand {
            Operand::Reference(name) => {
                let resolution = match self.prove(name, oracle, depth + 1)? {
                    Proof::Suspended(question) => Resolution::Suspended(question),
                    Proof::Unprovable => Resolution::Missing,
                    Proof::Proven { cf } => match self.facts.get(name) {
                        Some(fact) => Resolution::Resolved {
                            value: fact.value.clone(),
                            cf,
                        },
                        None => Resolution::Missing,
                    },
                };
                Ok(resolution)
            }
            Operand::Literal(token) => Ok(self.imply_literal(token)),
        }
    }

    /// Auto-assert a literal operand as a certain fact of the same name
    ///
    /// Names the knowledge base can establish by a rule or a question are
    /// never taken over by a literal; the collision is recorded instead.
    fn imply_literal(&mut self, token: &str) -> Resolution {
        let literal = FactValue::text(token);

        let shadowed = match self.facts.get(token) {
            Some(fact) if fact.provenance == Provenance::Implied => None,
            Some(fact) => Some(Shadowed::Fact {
                value: fact.value.clone(),
                provenance: fact.provenance.clone(),
            }),
            None if self.rules.iter().any(|rule| rule.concludes(token)) => {
                Some(Shadowed::RuleConclusion)
            }
            None if self.questions.contains_key(token) => Some(Shadowed::Question),
            None => {
                self.facts.assert(
                    token,
                    literal.clone(),
                    CERTAIN,
                    IMPLIED_EXPLANATION,
                    Provenance::Implied,
                );
                self.log(format!("Added implied fact from knowledge base: {}", token));
                None
            }
        };

        if let Some(shadowed) = shadowed {
            self.record_conflict(token, shadowed);
        }

        Resolution::Resolved {
            value: literal,
            cf: CERTAIN,
        }
    }

    fn record_conflict(&mut self, token: &str, shadowed: Shadowed) {
        if self.conflicts.iter().any(|c| c.literal == token) {
            return;
        }
        tracing::warn!(
            "Literal '{}' collides with {} '{}'; comparing against the literal",
            token,
            shadowed.label(),
            token
        );
        self.log(format!(
            "Conflict: literal '{}' names {}; left unchanged",
            token, shadowed
        ));
        self.conflicts.push(LiteralConflict {
            literal: token.to_string(),
            shadowed,
        });
    }

    fn log(&mut self, entry: String) {
        self.trace.push(entry);
    }

    /// Sorted, distinct names of facts concluded by some rule
    pub fn possible_goals(&self) -> BTreeSet<String> {
        self.rules
            .iter()
            .map(|rule| rule.conclusion.fact.clone())
            .collect()
    }

    /// Report on how a fact was established
    pub fn explain(&self, name: &str) -> Explanation {
        Explanation::for_fact(name, &self.facts)
    }

    /// Ordered trace of proof attempts and rule firings
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// Working memory
    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    /// Literal/fact name collisions seen so far
    pub fn conflicts(&self) -> &[LiteralConflict] {
        &self.conflicts
    }

    /// Session counters
    pub fn stats(&self) -> &ProofStats {
        &self.stats
    }

    /// Prompt text for a registered question
    pub fn question(&self, fact: &str) -> Option<&str> {
        self.questions.get(fact).map(String::as_str)
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
