//! Core types for Magic Stick

mod persona;
mod module;
mod state;
mod entity;
mod event;
mod reason;
mod output;
mod error;

pub use persona::Persona;
pub use module::{ModuleId, LevelIndex};
pub use state::LevelState;
pub use entity::{
    EntityId, EntityIdGen, Position, BloomTarget, Collectible, TargetKey, PromptMission,
    PromptProgress, BLOOM_PALETTE, KEY_ALPHABET, PROMPT_MISSIONS,
};
pub use event::{InputEvent, GameEvent};
pub use reason::ReasonCode;
pub use output::{SessionSnapshot, StepOutput};
pub use error::{GameError, ConfigError, ProgressError, GenerationError};
