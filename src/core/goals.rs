//! Goal table: the only source of completion thresholds

use serde::{Deserialize, Serialize};
use crate::{
    POINTER_L1_GOAL, POINTER_L2_GOAL, KEYBOARD_L1_GOAL, KEYBOARD_L2_GOAL,
    PROMPT_ROUNDS_GOAL,
};
use crate::types::{GameError, LevelIndex, ModuleId};

/// Score goals per (module, level)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalTable {
    pub pointer: [u32; 2],
    pub keyboard: [u32; 2],
    /// Full mission rounds for the prompt module
    pub prompt_rounds: u32,
}

impl Default for GoalTable {
    fn default() -> Self {
        Self {
            pointer: [POINTER_L1_GOAL, POINTER_L2_GOAL],
            keyboard: [KEYBOARD_L1_GOAL, KEYBOARD_L2_GOAL],
            prompt_rounds: PROMPT_ROUNDS_GOAL,
        }
    }
}

impl GoalTable {
    /// Goal for a pair, None when the module is free-form
    pub fn lookup(&self, module: ModuleId, level: LevelIndex) -> Option<u32> {
        match (module, level) {
            (ModuleId::Pointer, 1) => Some(self.pointer[0]),
            (ModuleId::Pointer, 2) => Some(self.pointer[1]),
            (ModuleId::Keyboard, 1) => Some(self.keyboard[0]),
            (ModuleId::Keyboard, 2) => Some(self.keyboard[1]),
            (ModuleId::Prompt, 1) => Some(self.prompt_rounds),
            _ => None,
        }
    }

    /// Goal for a pair that must have one
    pub fn goal(&self, module: ModuleId, level: LevelIndex) -> Result<u32, GameError> {
        self.lookup(module, level)
            .ok_or(GameError::NoGoal { module, level })
    }
}
