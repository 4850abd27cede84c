//! Error types
//!
//! Learner mistakes are never errors; they surface as [`ReasonCode`]s.
//! These enums cover invariant gaps, configuration, and collaborators.
//!
//! [`ReasonCode`]: crate::types::ReasonCode

use thiserror::Error;
use crate::types::{LevelIndex, ModuleId, Persona};

/// Invariant violations in the progression engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Scoring attempted for a pair missing from the goal table
    #[error("No goal defined for {module} level {level}")]
    NoGoal { module: ModuleId, level: LevelIndex },

    /// Navigation to a level the module does not have
    #[error("{module} has no level {level}")]
    NoSuchLevel { module: ModuleId, level: LevelIndex },

    /// Advance attempted from a pair missing from the transition table
    #[error("No transition defined from {module} level {level} for {persona}")]
    NoTransition {
        module: ModuleId,
        level: LevelIndex,
        persona: Persona,
    },

    /// Game input before a persona was chosen
    #[error("Persona not selected")]
    PersonaNotSelected,

    /// Persona is fixed until a full reset
    #[error("Persona already selected ({0}); reset to change it")]
    PersonaAlreadySelected(Persona),
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Progress store failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("User not found: {0}")]
    NotFound(String),
}

/// Image generation collaborator failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Image service unavailable: {0}")]
    Unavailable(String),
}
