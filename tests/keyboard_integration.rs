//! Integration tests for the keyboard module
//!
//! Key-down and text-change paths must never count the same press twice

mod common;

use common::{complete_level, key_name, new_session, seeded_config, session_with};
use magicstick::core::{Collaborators, GameSession};
use magicstick::types::{InputEvent, LevelState, ModuleId, Persona, ReasonCode, TargetKey};
use magicstick::{KEYBOARD_L1_GOAL, KEYBOARD_L2_GOAL};
use pretty_assertions::assert_eq;

fn keyboard_level_one(persona: Persona) -> GameSession {
    let mut session = new_session(persona);
    session.jump_to(ModuleId::Keyboard).unwrap();
    session.start().unwrap();
    session
}

fn keyboard_level_two(persona: Persona) -> GameSession {
    let mut session = keyboard_level_one(persona);
    complete_level(&mut session);
    session.advance().unwrap();
    session.start().unwrap();
    session
}

/// A level-1 session whose first target can be typed as text
fn typeable_level_one() -> (GameSession, char) {
    for seed in 0..64 {
        let mut session = session_with(Persona::Child, seeded_config(seed), Collaborators::silent());
        session.jump_to(ModuleId::Keyboard).unwrap();
        session.start().unwrap();
        match session.entities().target_key {
            Some(TargetKey::Letter(c)) => return (session, c.to_ascii_lowercase()),
            Some(TargetKey::Space) => return (session, ' '),
            _ => continue,
        }
    }
    panic!("no seed produced a typeable key");
}

#[test]
fn test_key_down_then_text_counts_once() {
    let (mut session, ch) = typeable_level_one();

    let down = session.handle(InputEvent::KeyDown { key: ch.to_string() }).unwrap();
    assert_eq!(down.reason, ReasonCode::R001_SCORED);

    // The same keystroke also updates the input box
    let text = session.handle(InputEvent::TextChanged { value: ch.to_string() }).unwrap();
    assert_eq!(text.reason, ReasonCode::R007_BUFFER_UPDATED);
    assert_eq!(session.score(), 1);
}

#[test]
fn test_text_path_scores_when_key_down_is_opaque() {
    let (mut session, ch) = typeable_level_one();

    // IME hosts hide the real key
    let down = session.handle(InputEvent::KeyDown { key: "Process".into() }).unwrap();
    assert_eq!(down.reason, ReasonCode::R003_KEY_MISMATCH);

    let text = session.handle(InputEvent::TextChanged { value: ch.to_string() }).unwrap();
    assert_eq!(text.reason, ReasonCode::R001_SCORED);
    assert_eq!(session.score(), 1);
    assert_eq!(session.entities().buffer, "");
}

#[test]
fn test_wrong_key_is_ignored() {
    let mut session = keyboard_level_one(Persona::Elder);
    let out = session.handle(InputEvent::KeyDown { key: "q".into() }).unwrap();
    assert_eq!(out.reason, ReasonCode::R003_KEY_MISMATCH);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_key_level_completes_after_goal() {
    let mut session = keyboard_level_one(Persona::Child);
    let inputs = complete_level(&mut session);
    assert_eq!(inputs, KEYBOARD_L1_GOAL);
    assert_eq!(session.level_state(), LevelState::Completed);
    assert!(session.entities().target_key.is_some());

    let key = key_name(session.entities().target_key.unwrap());
    let out = session.handle(InputEvent::KeyDown { key }).unwrap();
    assert_eq!(out.reason, ReasonCode::R002_LEVEL_COMPLETED);
    assert_eq!(session.score(), KEYBOARD_L1_GOAL);
}

#[test]
fn test_level_two_waits_for_start() {
    let mut session = keyboard_level_one(Persona::Elder);
    complete_level(&mut session);
    session.advance().unwrap();

    assert_eq!(session.level(), 2);
    assert_eq!(session.level_state(), LevelState::NotStarted);
    assert_eq!(session.entities().target_word, None);
}

#[test]
fn test_word_then_enter_counts_once() {
    let mut session = keyboard_level_two(Persona::Elder);
    let word = session.entities().target_word.unwrap();
    assert!(Persona::Elder.word_list().contains(&word));

    let typed = session.handle(InputEvent::TextChanged { value: word.to_string() }).unwrap();
    assert_eq!(typed.reason, ReasonCode::R001_SCORED);

    let enter = session.handle(InputEvent::KeyDown { key: "Enter".into() }).unwrap();
    assert_eq!(enter.reason, ReasonCode::R003_WORD_MISMATCH);
    assert_eq!(session.score(), 1);
}

#[test]
fn test_partial_word_does_not_submit() {
    let mut session = keyboard_level_two(Persona::Child);
    let word = session.entities().target_word.unwrap();
    let partial: String = word.chars().take(1).collect();

    let typed = session.handle(InputEvent::TextChanged { value: partial.clone() }).unwrap();
    assert_eq!(typed.reason, ReasonCode::R007_BUFFER_UPDATED);
    assert_eq!(typed.snapshot.text_buffer, partial);

    for key in ["Enter", " "] {
        let out = session.handle(InputEvent::KeyDown { key: key.into() }).unwrap();
        assert_eq!(out.reason, ReasonCode::R003_WORD_MISMATCH);
    }
    assert_eq!(session.score(), 0);
}

#[test]
fn test_words_come_from_persona_list() {
    let mut session = keyboard_level_two(Persona::Child);
    for _ in 0..KEYBOARD_L2_GOAL - 1 {
        let word = session.entities().target_word.unwrap();
        assert!(Persona::Child.word_list().contains(&word));
        session.handle(InputEvent::TextChanged { value: word.to_string() }).unwrap();
    }
    assert_eq!(session.score(), KEYBOARD_L2_GOAL - 1);
    assert_eq!(session.level_state(), LevelState::InProgress);

    let word = session.entities().target_word.unwrap();
    let out = session.handle(InputEvent::TextChanged { value: word.to_string() }).unwrap();
    assert_eq!(out.reason, ReasonCode::R001_GOAL_REACHED);
    assert_eq!(session.level_state(), LevelState::Completed);
}
