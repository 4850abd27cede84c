//! Output structures for presentation and terminal display

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{GameEvent, LevelIndex, LevelState, ModuleId, Persona, ReasonCode, TargetKey};

/// Read-only view of the session for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub persona: Option<Persona>,
    pub module: ModuleId,
    pub level: LevelIndex,
    pub score: u32,
    /// None for free-form modules
    pub goal: Option<u32>,
    pub state: LevelState,
    pub praise: Option<String>,
    pub milestone: Option<String>,
    pub live_blooms: usize,
    pub leaves_left: usize,
    pub target_key: Option<TargetKey>,
    pub target_word: Option<String>,
    pub text_buffer: String,
    pub mission_index: Option<usize>,
    pub selections: Vec<String>,
    pub listening: bool,
    pub transcript: String,
    pub reply: Option<String>,
    pub generating: bool,
    pub image_url: Option<String>,
}

impl SessionSnapshot {
    /// Progress toward the goal in [0, 1]; free-form modules report 0
    pub fn progress(&self) -> f64 {
        match self.goal {
            Some(goal) if goal > 0 => (self.score as f64 / goal as f64).min(1.0),
            _ => 0.0,
        }
    }
}

/// Result of one session operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutput {
    pub timestamp: DateTime<Utc>,
    pub reason: ReasonCode,
    pub events: Vec<GameEvent>,
    pub snapshot: SessionSnapshot,
}

impl StepOutput {
    pub fn new(reason: ReasonCode, events: Vec<GameEvent>, snapshot: SessionSnapshot) -> Self {
        Self {
            timestamp: Utc::now(),
            reason,
            events,
            snapshot,
        }
    }

    /// Did this step record a scoring event?
    pub fn scored(&self) -> bool {
        self.reason.is_scoring()
    }

    fn score_text(&self) -> String {
        match self.snapshot.goal {
            Some(goal) => format!("{}/{}", self.snapshot.score, goal),
            None => "-".to_string(),
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let state = self.snapshot.state;
        format!(
            "{}{} {} L{} | score={} | state={} | {}{}",
            state.color_code(),
            state.emoji(),
            self.snapshot.module,
            self.snapshot.level,
            self.score_text(),
            state,
            self.reason.code(),
            LevelState::color_reset()
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "module={} | level={} | score={} | state={} | reason={}",
            self.snapshot.module,
            self.snapshot.level,
            self.score_text(),
            self.snapshot.state,
            self.reason.code()
        )
    }
}
