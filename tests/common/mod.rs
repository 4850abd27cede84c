//! Shared drivers for the integration tests

#![allow(dead_code)]

use magicstick::core::{Collaborators, GameConfig, GameSession};
use magicstick::types::{EntityId, InputEvent, ModuleId, Persona, StepOutput, TargetKey};

/// Inside the default 1200x800 surface's basket
pub const IN_BASKET: (f64, f64) = (1100.0, 700.0);

pub fn seeded_config(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    }
}

pub fn new_session(persona: Persona) -> GameSession {
    session_with(persona, seeded_config(42), Collaborators::silent())
}

pub fn session_with(persona: Persona, config: GameConfig, collaborators: Collaborators) -> GameSession {
    let mut session = GameSession::new(config, collaborators);
    session.select_persona(persona).unwrap();
    session
}

/// Key name a host reports for the target
pub fn key_name(key: TargetKey) -> String {
    match key {
        TargetKey::Letter(c) => c.to_ascii_lowercase().to_string(),
        TargetKey::Enter => "Enter".to_string(),
        TargetKey::Space => " ".to_string(),
    }
}

pub fn live_bloom(session: &GameSession) -> Option<EntityId> {
    session.entities().blooms.iter().find(|b| !b.is_bloomed).map(|b| b.id)
}

pub fn loose_leaf(session: &GameSession) -> Option<EntityId> {
    session.entities().leaves.iter().find(|l| !l.is_collected).map(|l| l.id)
}

/// Play one valid scoring input for the active level
pub fn score_once(session: &mut GameSession) -> StepOutput {
    match (session.module(), session.level()) {
        (ModuleId::Pointer, 1) => {
            if live_bloom(session).is_none() {
                session.tick(session.config().bloom_respawn_ms);
            }
            let id = live_bloom(session).unwrap();
            session.handle(InputEvent::Click { id }).unwrap()
        }
        (ModuleId::Pointer, _) => {
            if loose_leaf(session).is_none() {
                session.tick(session.config().leaf_refill_ms);
            }
            let id = loose_leaf(session).unwrap();
            let (x, y) = IN_BASKET;
            session.handle(InputEvent::DragRelease { id, x, y }).unwrap()
        }
        (ModuleId::Keyboard, 1) => {
            let key = key_name(session.entities().target_key.unwrap());
            session.handle(InputEvent::KeyDown { key }).unwrap()
        }
        (ModuleId::Keyboard, _) => {
            let value = session.entities().target_word.unwrap().to_string();
            session.handle(InputEvent::TextChanged { value }).unwrap()
        }
        (ModuleId::Prompt, _) => {
            let mut out = session.handle(InputEvent::ChooseOption { index: 0 }).unwrap();
            while !out.scored() {
                out = session.handle(InputEvent::ChooseOption { index: 0 }).unwrap();
            }
            out
        }
        (module, _) => panic!("{} has no scoring input", module),
    }
}

/// Start (if needed) and play the active level to completion
pub fn complete_level(session: &mut GameSession) -> u32 {
    if !session.is_started() {
        session.start().unwrap();
    }
    let mut inputs = 0;
    while !session.is_completed() {
        score_once(session);
        inputs += 1;
        assert!(inputs <= 100, "level never completed");
    }
    inputs
}
