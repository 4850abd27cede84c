//! Raw input events in, game events out

use serde::{Deserialize, Serialize};
use crate::types::{EntityId, LevelIndex, ModuleId, TargetKey};

/// A raw input event delivered by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Click on an entity
    Click { id: EntityId },
    /// Drag released at a point, in pixels from the play surface's top-left
    DragRelease { id: EntityId, x: f64, y: f64 },
    /// Key-down with the host's key name ("a", " ", "Enter", "Process", ...)
    KeyDown { key: String },
    /// Full new value of the text input
    TextChanged { value: String },
    /// Choice picked for the current prompt mission
    ChooseOption { index: usize },
}

/// Something observable that happened while handling an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Scored { amount: u32, score: u32, goal: u32 },
    GoalReached { module: ModuleId, level: LevelIndex, score: u32 },
    BloomSpawned { id: EntityId },
    LeavesSpawned { count: usize },
    KeySelected { key: TargetKey },
    WordSelected { word: String },
    MissionAnswered { mission: usize, choice: String },
    RoundCompleted { prompt: String },
    PraiseShown { text: String },
    PraiseCleared,
    MilestoneShown { text: String },
    Transitioned {
        from: ModuleId,
        from_level: LevelIndex,
        to: ModuleId,
        to_level: LevelIndex,
        auto_started: bool,
    },
    ListeningChanged { listening: bool },
    TranscriptReceived { text: String },
    ReplySpoken { text: String },
    CreationStarted { prompt: String },
    CreationReady { image_url: String },
    CreationFailed,
}
