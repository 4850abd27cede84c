//! Transition table: where the advance action leads
//!
//! pointer/1 → pointer/2 → keyboard/1 → keyboard/2 → prompt (child) → creation
//!                                               └→ voice (elder)  → creation
//!
//! Kept as one explicit map keyed by (module, level, persona) so the whole
//! graph can be enumerated and checked in one place.

use std::collections::HashMap;
use serde::Serialize;
use crate::types::{GameError, LevelIndex, ModuleId, Persona};

/// Destination of an advance action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub module: ModuleId,
    pub level: LevelIndex,
    /// Start the destination immediately instead of waiting for "start"
    pub auto_start: bool,
}

impl Transition {
    fn to(module: ModuleId, level: LevelIndex, auto_start: bool) -> Self {
        Self { module, level, auto_start }
    }
}

/// Finite map of every legal advance
#[derive(Debug, Clone)]
pub struct TransitionTable {
    edges: HashMap<(ModuleId, LevelIndex, Persona), Transition>,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TransitionTable {
    /// The game's progression graph
    pub fn standard() -> Self {
        let mut edges = HashMap::new();
        for persona in [Persona::Elder, Persona::Child] {
            edges.insert((ModuleId::Pointer, 1, persona), Transition::to(ModuleId::Pointer, 2, true));
            edges.insert((ModuleId::Pointer, 2, persona), Transition::to(ModuleId::Keyboard, 1, false));
            edges.insert((ModuleId::Keyboard, 1, persona), Transition::to(ModuleId::Keyboard, 2, false));
            // Reachable by manual navigation for either persona
            edges.insert((ModuleId::Prompt, 1, persona), Transition::to(ModuleId::Creation, 1, true));
            edges.insert((ModuleId::Voice, 1, persona), Transition::to(ModuleId::Creation, 1, true));
        }
        edges.insert((ModuleId::Keyboard, 2, Persona::Child), Transition::to(ModuleId::Prompt, 1, true));
        edges.insert((ModuleId::Keyboard, 2, Persona::Elder), Transition::to(ModuleId::Voice, 1, true));
        Self { edges }
    }

    /// Next pair after (module, level); Ok(None) at the end of the chain
    pub fn next(
        &self,
        module: ModuleId,
        level: LevelIndex,
        persona: Persona,
    ) -> Result<Option<Transition>, GameError> {
        if module == ModuleId::Creation {
            return Ok(None);
        }
        self.edges
            .get(&(module, level, persona))
            .copied()
            .map(Some)
            .ok_or(GameError::NoTransition { module, level, persona })
    }

    /// Every (module, level) a persona visits by advancing from the start
    pub fn path(&self, persona: Persona) -> Result<Vec<(ModuleId, LevelIndex)>, GameError> {
        let mut path = vec![(ModuleId::Pointer, 1)];
        let (mut module, mut level) = (ModuleId::Pointer, 1);
        while let Some(next) = self.next(module, level, persona)? {
            module = next.module;
            level = next.level;
            path.push((module, level));
            if path.len() > self.edges.len() + 1 {
                break;
            }
        }
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
