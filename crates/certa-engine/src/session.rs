//! Proof sessions - one engine, one oracle, one knowledge base

use crate::{EngineConfig, EngineError, Proof, ProofEngine, ReasoningMode};
use certa_domain::{AnswerOracle, KnowledgeBase};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a session (UUIDv7, time-ordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new session id
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A proof session
///
/// Keeps the ingested knowledge base so the engine can be rebuilt on restart.
pub struct Session<O: AnswerOracle> {
    id: SessionId,
    knowledge_base: KnowledgeBase,
    config: EngineConfig,
    engine: ProofEngine,
    oracle: O,
}

impl<O> Session<O>
where
    O: AnswerOracle,
    O::Error: fmt::Display,
{
    /// Start a session
    pub fn new(
        knowledge_base: KnowledgeBase,
        config: EngineConfig,
        oracle: O,
    ) -> Result<Self, EngineError> {
        if config.max_depth == 0 {
            return Err(EngineError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }

        let id = SessionId::new();
        tracing::info!("Starting session {} ({} reasoning)", id, config.reasoning);
        let engine = ProofEngine::new(knowledge_base.clone(), config.clone());

        Ok(Self {
            id,
            knowledge_base,
            config,
            engine,
            oracle,
        })
    }

    /// Prove a goal against this session's oracle
    pub fn prove_goal(&mut self, goal: &str) -> Result<Proof, EngineError> {
        self.engine.prove_goal(goal, &mut self.oracle)
    }

    /// Session id
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The engine (facts, trace, explanations)
    pub fn engine(&self) -> &ProofEngine {
        &self.engine
    }

    /// The answer oracle
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Mutable access to the oracle, for submitting answers
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    /// The knowledge base the session was started from
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Active reasoning mode
    pub fn mode(&self) -> ReasoningMode {
        self.config.reasoning
    }

    /// Switch reasoning mode
    ///
    /// Rebuilds the engine so no fact carries a confidence computed under the
    /// previous mode. Answers already in the oracle are kept.
    pub fn set_mode(&mut self, mode: ReasoningMode) {
        tracing::info!("Session {}: switching to {} reasoning", self.id, mode);
        self.config.reasoning = mode;
        self.engine = ProofEngine::new(self.knowledge_base.clone(), self.config.clone());
    }

    /// Discard all session state and start over with a fresh oracle
    pub fn restart(&mut self)
    where
        O: Default,
    {
        let previous = self.id;
        self.id = SessionId::new();
        self.engine = ProofEngine::new(self.knowledge_base.clone(), self.config.clone());
        self.oracle = O::default();
        tracing::info!("Session {} restarted as {}", previous, self.id);
    }
}
