//! Level state definitions

use serde::{Deserialize, Serialize};

/// Lifecycle of the active (module, level) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LevelState {
    /// Waiting for the learner's start action
    NotStarted,
    /// Accepting scoring events
    InProgress,
    /// Goal reached, waiting for the advance action
    Completed,
}

impl LevelState {
    /// Derive the state from the session flags
    pub fn from_flags(started: bool, completed: bool) -> Self {
        if completed {
            LevelState::Completed
        } else if started {
            LevelState::InProgress
        } else {
            LevelState::NotStarted
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            LevelState::NotStarted => "\x1b[90m", // Gray
            LevelState::InProgress => "\x1b[33m", // Yellow
            LevelState::Completed => "\x1b[32m",  // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            LevelState::NotStarted => "⏳",
            LevelState::InProgress => "🌱",
            LevelState::Completed => "🏆",
        }
    }
}

impl std::fmt::Display for LevelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LevelState::NotStarted => "NOT_STARTED",
            LevelState::InProgress => "IN_PROGRESS",
            LevelState::Completed => "COMPLETED",
        };
        write!(f, "{}", name)
    }
}
