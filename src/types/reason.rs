//! Reason codes for every decision the session makes
//! R001 scoring, R002 gating, R003 rejected input, R004 lifecycle,
//! R005 timers, R006 voice and creation, R007 partial input

use serde::{Deserialize, Serialize};

/// Why an operation ended the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Scoring
    // =========================================================================
    /// Valid scoring event, goal not yet reached
    R001_SCORED,
    /// Valid scoring event that reached the goal
    R001_GOAL_REACHED,

    // =========================================================================
    // R002: Gating
    // =========================================================================
    /// Level not started yet
    R002_NOT_STARTED,
    /// Level already completed, waiting for advance
    R002_LEVEL_COMPLETED,
    /// Event does not apply to the active module or level
    R002_WRONG_MODULE,

    // =========================================================================
    // R003: Rejected input (silently ignored)
    // =========================================================================
    /// No live entity with that id
    R003_UNKNOWN_ENTITY,
    /// Entity already bloomed or collected
    R003_ALREADY_RESOLVED,
    /// Drag released outside the basket
    R003_OUTSIDE_BASKET,
    /// Key does not match the target
    R003_KEY_MISMATCH,
    /// Buffer does not match the target word
    R003_WORD_MISMATCH,
    /// Choice index outside the current mission
    R003_INVALID_CHOICE,

    // =========================================================================
    // R004: Lifecycle
    // =========================================================================
    /// Persona chosen
    R004_PERSONA_SELECTED,
    /// Level started
    R004_STARTED,
    /// Start requested but nothing to start
    R004_ALREADY_STARTED,
    /// Moved to the next module or level
    R004_TRANSITIONED,
    /// Advance requested before the level was completed
    R004_NOT_ADVANCEABLE,
    /// Manual module jump
    R004_JUMPED,
    /// Current level restarted
    R004_RESTARTED,
    /// Full reset to persona selection
    R004_RESET,

    // =========================================================================
    // R005: Timers
    // =========================================================================
    /// Clock advanced, due timers fired
    R005_CLOCK_ADVANCED,

    // =========================================================================
    // R006: Voice and creation
    // =========================================================================
    /// Listening started
    R006_LISTENING,
    /// Already listening, request ignored
    R006_ALREADY_LISTENING,
    /// Speech input unavailable on this host
    R006_SPEECH_UNAVAILABLE,
    /// Listening ended
    R006_LISTENING_ENDED,
    /// Transcript stored
    R006_TRANSCRIPT,
    /// Image generation in flight
    R006_GENERATING,
    /// Nothing to turn into an image
    R006_NOTHING_TO_CREATE,

    // =========================================================================
    // R007: Partial input
    // =========================================================================
    /// Text buffer updated without a match
    R007_BUFFER_UPDATED,
    /// Prompt mission answered, round continues
    R007_MISSION_ANSWERED,
    /// Read-only status query
    R007_STATUS,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_SCORED => "R001_SCORED",
            Self::R001_GOAL_REACHED => "R001_GOAL_REACHED",
            Self::R002_NOT_STARTED => "R002_NOT_STARTED",
            Self::R002_LEVEL_COMPLETED => "R002_LEVEL_COMPLETED",
            Self::R002_WRONG_MODULE => "R002_WRONG_MODULE",
            Self::R003_UNKNOWN_ENTITY => "R003_UNKNOWN_ENTITY",
            Self::R003_ALREADY_RESOLVED => "R003_ALREADY_RESOLVED",
            Self::R003_OUTSIDE_BASKET => "R003_OUTSIDE_BASKET",
            Self::R003_KEY_MISMATCH => "R003_KEY_MISMATCH",
            Self::R003_WORD_MISMATCH => "R003_WORD_MISMATCH",
            Self::R003_INVALID_CHOICE => "R003_INVALID_CHOICE",
            Self::R004_PERSONA_SELECTED => "R004_PERSONA_SELECTED",
            Self::R004_STARTED => "R004_STARTED",
            Self::R004_ALREADY_STARTED => "R004_ALREADY_STARTED",
            Self::R004_TRANSITIONED => "R004_TRANSITIONED",
            Self::R004_NOT_ADVANCEABLE => "R004_NOT_ADVANCEABLE",
            Self::R004_JUMPED => "R004_JUMPED",
            Self::R004_RESTARTED => "R004_RESTARTED",
            Self::R004_RESET => "R004_RESET",
            Self::R005_CLOCK_ADVANCED => "R005_CLOCK_ADVANCED",
            Self::R006_LISTENING => "R006_LISTENING",
            Self::R006_ALREADY_LISTENING => "R006_ALREADY_LISTENING",
            Self::R006_SPEECH_UNAVAILABLE => "R006_SPEECH_UNAVAILABLE",
            Self::R006_LISTENING_ENDED => "R006_LISTENING_ENDED",
            Self::R006_TRANSCRIPT => "R006_TRANSCRIPT",
            Self::R006_GENERATING => "R006_GENERATING",
            Self::R006_NOTHING_TO_CREATE => "R006_NOTHING_TO_CREATE",
            Self::R007_BUFFER_UPDATED => "R007_BUFFER_UPDATED",
            Self::R007_MISSION_ANSWERED => "R007_MISSION_ANSWERED",
            Self::R007_STATUS => "R007_STATUS",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_SCORED => "Scored",
            Self::R001_GOAL_REACHED => "Goal reached - level complete",
            Self::R002_NOT_STARTED => "Level not started",
            Self::R002_LEVEL_COMPLETED => "Level already complete",
            Self::R002_WRONG_MODULE => "Not used by this module",
            Self::R003_UNKNOWN_ENTITY => "No such target",
            Self::R003_ALREADY_RESOLVED => "Target already used",
            Self::R003_OUTSIDE_BASKET => "Dropped outside the basket",
            Self::R003_KEY_MISMATCH => "Different key",
            Self::R003_WORD_MISMATCH => "Word not finished",
            Self::R003_INVALID_CHOICE => "No such choice",
            Self::R004_PERSONA_SELECTED => "Persona selected",
            Self::R004_STARTED => "Level started",
            Self::R004_ALREADY_STARTED => "Already running",
            Self::R004_TRANSITIONED => "Moved on",
            Self::R004_NOT_ADVANCEABLE => "Finish the level first",
            Self::R004_JUMPED => "Jumped to module",
            Self::R004_RESTARTED => "Level restarted",
            Self::R004_RESET => "Back to the beginning",
            Self::R005_CLOCK_ADVANCED => "Time passed",
            Self::R006_LISTENING => "Listening",
            Self::R006_ALREADY_LISTENING => "Already listening",
            Self::R006_SPEECH_UNAVAILABLE => "Speech input unavailable",
            Self::R006_LISTENING_ENDED => "Stopped listening",
            Self::R006_TRANSCRIPT => "Heard you",
            Self::R006_GENERATING => "Drawing",
            Self::R006_NOTHING_TO_CREATE => "Say something to draw first",
            Self::R007_BUFFER_UPDATED => "Typing",
            Self::R007_MISSION_ANSWERED => "Mission answered",
            Self::R007_STATUS => "Status",
        }
    }

    /// Did the input count toward the goal?
    pub fn is_scoring(&self) -> bool {
        matches!(self, Self::R001_SCORED | Self::R001_GOAL_REACHED)
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
