//! Transient, module-scoped game objects
//!
//! Everything here is destroyed on every level or module transition.

use serde::{Deserialize, Serialize};

/// Identity of a spawned entity, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id source; replaces timestamp ids that collide under fast input
#[derive(Debug, Default, Clone)]
pub struct EntityIdGen {
    next: u64,
}

impl EntityIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> EntityId {
        self.next += 1;
        EntityId(self.next)
    }
}

/// Position on the play surface, in percent of width/height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Pointer level 1 click target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloomTarget {
    pub id: EntityId,
    pub position: Position,
    /// Index into [`BLOOM_PALETTE`]
    pub color_index: usize,
    pub is_bloomed: bool,
}

impl BloomTarget {
    pub fn color(&self) -> &'static str {
        BLOOM_PALETTE[self.color_index % BLOOM_PALETTE.len()]
    }
}

/// Flower colors
pub const BLOOM_PALETTE: [&str; 5] = ["#ff7eb6", "#ffb6b6", "#ffcc00", "#99ccff", "#cc99ff"];

/// Pointer level 2 draggable leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub position: Position,
    pub is_collected: bool,
}

/// Keyboard level 1 key to press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKey {
    Letter(char),
    Enter,
    Space,
}

/// The key alphabet for keyboard level 1
pub const KEY_ALPHABET: [TargetKey; 9] = [
    TargetKey::Letter('A'),
    TargetKey::Letter('S'),
    TargetKey::Letter('D'),
    TargetKey::Letter('F'),
    TargetKey::Letter('J'),
    TargetKey::Letter('K'),
    TargetKey::Letter('L'),
    TargetKey::Enter,
    TargetKey::Space,
];

impl TargetKey {
    /// Does a key-down event's key name hit this target?
    ///
    /// Letters compare case-insensitively; a literal space maps to Space.
    pub fn matches_key_name(&self, key: &str) -> bool {
        match self {
            TargetKey::Enter => key == "Enter",
            TargetKey::Space => key == " " || key == "Space" || key == "Spacebar",
            TargetKey::Letter(c) => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(k), None) => k.to_ascii_uppercase() == *c,
                    _ => false,
                }
            }
        }
    }

    /// Does the last character typed into the text buffer hit this target?
    ///
    /// Enter never shows up in a text buffer.
    pub fn matches_char(&self, ch: char) -> bool {
        match self {
            TargetKey::Enter => false,
            TargetKey::Space => ch == ' ',
            TargetKey::Letter(c) => ch.to_ascii_uppercase() == *c,
        }
    }

    /// Glyph shown on the big key cap
    pub fn glyph(&self) -> String {
        match self {
            TargetKey::Enter => "↵".to_string(),
            TargetKey::Space => "⏵".to_string(),
            TargetKey::Letter(c) => c.to_string(),
        }
    }
}

impl std::fmt::Display for TargetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKey::Enter => write!(f, "Enter"),
            TargetKey::Space => write!(f, "Space"),
            TargetKey::Letter(c) => write!(f, "{}", c),
        }
    }
}

/// One step of the prompt-building module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptMission {
    pub question: &'static str,
    pub choices: &'static [&'static str],
}

/// Fixed, ordered mission list
pub static PROMPT_MISSIONS: [PromptMission; 4] = [
    PromptMission {
        question: "누가 나올까?",
        choices: &["강아지", "고양이", "공룡", "로봇"],
    },
    PromptMission {
        question: "어디에 있을까?",
        choices: &["바닷속", "우주", "숲속", "구름 위"],
    },
    PromptMission {
        question: "무엇을 하고 있을까?",
        choices: &["춤추는", "노래하는", "잠자는", "날아가는"],
    },
    PromptMission {
        question: "어떤 그림으로 그릴까?",
        choices: &["크레파스", "수채화", "만화", "반짝이는"],
    },
];

/// Progress through the current round of missions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptProgress {
    pub mission_index: usize,
    pub selections: Vec<String>,
}

impl PromptProgress {
    /// The mission waiting for an answer
    pub fn current_mission(&self) -> Option<&'static PromptMission> {
        PROMPT_MISSIONS.get(self.mission_index)
    }

    /// Every mission answered once
    pub fn is_round_complete(&self) -> bool {
        self.selections.len() >= PROMPT_MISSIONS.len()
    }

    /// Selections joined in mission order
    pub fn composed(&self) -> String {
        self.selections.join(" ")
    }

    pub fn clear(&mut self) {
        self.mission_index = 0;
        self.selections.clear();
    }
}
