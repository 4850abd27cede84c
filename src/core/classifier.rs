//! Input classifiers: raw events → scoring events or no-ops
//!
//! Each classifier works on the active level's transient entities and
//! either reports a hit, a non-scoring update, or a reason to ignore the
//! event. Gating on started/completed happens in [`gate`] before any
//! classifier runs.
//!
//! Keyboard matching is exactly-once per physical keystroke:
//! - level 1: key-down is authoritative as soon as one identifiable key-down
//!   has been seen; text changes only score while key-down is unavailable
//! - level 2: both paths compare one shared buffer, and the path that
//!   matches clears it, so the other path has nothing left to match

use crate::{TONE_BLOOM_BASE, TONE_BLOOM_STEP, TONE_CHOICE, TONE_KEY, TONE_LEAF, TONE_WORD};
use crate::core::GameConfig;
use crate::types::{
    BloomTarget, Collectible, EntityId, LevelIndex, PromptProgress, ReasonCode, TargetKey,
};

/// Key names hosts report when the real key is hidden (IME composition etc.)
const OPAQUE_KEYS: [&str; 3] = ["Process", "Unidentified", "Dead"];

/// Transient state of the active level
#[derive(Debug, Default, Clone)]
pub struct LevelEntities {
    pub blooms: Vec<BloomTarget>,
    pub leaves: Vec<Collectible>,
    pub target_key: Option<TargetKey>,
    pub target_word: Option<&'static str>,
    /// Text input contents
    pub buffer: String,
    /// An identifiable key-down was seen this level
    pub keydown_live: bool,
    pub prompt: PromptProgress,
}

impl LevelEntities {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Unbloomed targets on screen
    pub fn live_blooms(&self) -> usize {
        self.blooms.iter().filter(|b| !b.is_bloomed).count()
    }

    /// Leaves not yet in the basket
    pub fn leaves_left(&self) -> usize {
        self.leaves.iter().filter(|l| !l.is_collected).count()
    }
}

/// What a valid scoring event hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Bloom(EntityId),
    Leaf(EntityId),
    Key,
    Word,
    /// All missions answered; carries the composed prompt
    Round(String),
}

impl Hit {
    /// Tone for the hit; blooms climb with the score
    pub fn tone(&self, score_before: u32) -> f32 {
        match self {
            Hit::Bloom(_) => TONE_BLOOM_BASE + TONE_BLOOM_STEP * score_before as f32,
            Hit::Leaf(_) => TONE_LEAF,
            Hit::Key => TONE_KEY,
            Hit::Word => TONE_WORD,
            Hit::Round(_) => TONE_CHOICE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Counts one point toward the goal
    Score(Hit),
    /// Accepted without scoring
    Update(ReasonCode),
    /// Silently ignored
    Ignored(ReasonCode),
}

/// No scoring before start or after completion
pub fn gate(started: bool, completed: bool) -> Result<(), ReasonCode> {
    if completed {
        Err(ReasonCode::R002_LEVEL_COMPLETED)
    } else if !started {
        Err(ReasonCode::R002_NOT_STARTED)
    } else {
        Ok(())
    }
}

/// Pointer level 1: click on a bloom target, once per id
pub fn click(entities: &mut LevelEntities, id: EntityId) -> Classification {
    match entities.blooms.iter_mut().find(|b| b.id == id) {
        None => Classification::Ignored(ReasonCode::R003_UNKNOWN_ENTITY),
        Some(target) if target.is_bloomed => Classification::Ignored(ReasonCode::R003_ALREADY_RESOLVED),
        Some(target) => {
            target.is_bloomed = true;
            Classification::Score(Hit::Bloom(id))
        }
    }
}

/// Pointer level 2: leaf released at (x, y), once per id, only in the basket
pub fn drag_release(
    entities: &mut LevelEntities,
    config: &GameConfig,
    id: EntityId,
    x: f64,
    y: f64,
) -> Classification {
    match entities.leaves.iter_mut().find(|l| l.id == id) {
        None => Classification::Ignored(ReasonCode::R003_UNKNOWN_ENTITY),
        Some(leaf) if leaf.is_collected => Classification::Ignored(ReasonCode::R003_ALREADY_RESOLVED),
        Some(_) if !config.in_basket(x, y) => Classification::Ignored(ReasonCode::R003_OUTSIDE_BASKET),
        Some(leaf) => {
            leaf.is_collected = true;
            Classification::Score(Hit::Leaf(id))
        }
    }
}

/// Keyboard: key-down path
pub fn key_down(entities: &mut LevelEntities, level: LevelIndex, key: &str) -> Classification {
    if level == 1 {
        if OPAQUE_KEYS.contains(&key) {
            return Classification::Ignored(ReasonCode::R003_KEY_MISMATCH);
        }
        entities.keydown_live = true;
        match entities.target_key {
            Some(target) if target.matches_key_name(key) => {
                entities.buffer.clear();
                Classification::Score(Hit::Key)
            }
            _ => Classification::Ignored(ReasonCode::R003_KEY_MISMATCH),
        }
    } else if matches!(key, "Enter" | " " | "Space") {
        submit_word(entities)
    } else {
        Classification::Update(ReasonCode::R007_BUFFER_UPDATED)
    }
}

/// Keyboard: text-change path
pub fn text_changed(entities: &mut LevelEntities, level: LevelIndex, value: &str) -> Classification {
    entities.buffer = value.to_string();
    if level == 1 {
        if entities.keydown_live {
            return Classification::Update(ReasonCode::R007_BUFFER_UPDATED);
        }
        let last = entities.buffer.chars().last();
        match (entities.target_key, last) {
            (Some(target), Some(ch)) if target.matches_char(ch) => {
                entities.buffer.clear();
                Classification::Score(Hit::Key)
            }
            _ => Classification::Update(ReasonCode::R007_BUFFER_UPDATED),
        }
    } else {
        match entities.target_word {
            Some(word) if entities.buffer == word => {
                entities.buffer.clear();
                Classification::Score(Hit::Word)
            }
            _ => Classification::Update(ReasonCode::R007_BUFFER_UPDATED),
        }
    }
}

fn submit_word(entities: &mut LevelEntities) -> Classification {
    match entities.target_word {
        Some(word) if entities.buffer == word => {
            entities.buffer.clear();
            Classification::Score(Hit::Word)
        }
        _ => Classification::Ignored(ReasonCode::R003_WORD_MISMATCH),
    }
}

/// Prompt: pick a choice for the current mission; there are no wrong answers
pub fn choose(entities: &mut LevelEntities, index: usize) -> Classification {
    let progress = &mut entities.prompt;
    let Some(mission) = progress.current_mission() else {
        return Classification::Ignored(ReasonCode::R003_INVALID_CHOICE);
    };
    let Some(choice) = mission.choices.get(index) else {
        return Classification::Ignored(ReasonCode::R003_INVALID_CHOICE);
    };
    progress.selections.push((*choice).to_string());
    progress.mission_index += 1;
    if progress.is_round_complete() {
        Classification::Score(Hit::Round(progress.composed()))
    } else {
        Classification::Update(ReasonCode::R007_MISSION_ANSWERED)
    }
}
