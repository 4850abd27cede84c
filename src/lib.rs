//! Magic Stick: progression engine for a persona-adaptive computer-skills game
//!
//! Input event → classifier → score tracker → level state machine → feedback.
//! Presentation, speech, sound and image generation sit behind the
//! collaborator traits in [`core::collaborators`].

pub mod core;
pub mod types;

// =============================================================================
// GOALS - score needed to complete each level
// =============================================================================

/// Pointer level 1: flowers to bloom
pub const POINTER_L1_GOAL: u32 = 30;

/// Pointer level 2: leaves to drop in the basket
pub const POINTER_L2_GOAL: u32 = 15;

/// Keyboard level 1: target keys to press
pub const KEYBOARD_L1_GOAL: u32 = 15;

/// Keyboard level 2: words to type
pub const KEYBOARD_L2_GOAL: u32 = 5;

/// Prompt module: full rounds of missions to answer
pub const PROMPT_ROUNDS_GOAL: u32 = 1;

// =============================================================================
// TIMING (milliseconds)
// =============================================================================

/// Delay between a bloom and its replacement target
pub const BLOOM_RESPAWN_DELAY_MS: u64 = 800;

/// Delay before a drained leaf batch is refilled
pub const LEAF_REFILL_DELAY_MS: u64 = 1000;

/// How long a praise phrase stays on screen
pub const PRAISE_DURATION_MS: u64 = 1000;

/// Simulated image-generation latency
pub const GENERATION_DELAY_MS: u64 = 3000;

// =============================================================================
// PLAY SURFACE
// =============================================================================

/// Default play surface width in pixels
pub const SURFACE_WIDTH: f64 = 1200.0;

/// Default play surface height in pixels
pub const SURFACE_HEIGHT: f64 = 800.0;

/// Side of the square basket hot-zone in the bottom-right corner
pub const BASKET_SIZE: f64 = 220.0;

/// Leaves spawned per batch
pub const LEAF_BATCH_SIZE: usize = 10;

/// Refill once this many (or fewer) leaves are left
pub const LEAF_REFILL_THRESHOLD: usize = 1;

// =============================================================================
// TONES (Hz)
// =============================================================================

pub const TONE_BLOOM_BASE: f32 = 440.0;
pub const TONE_BLOOM_STEP: f32 = 5.0;
pub const TONE_LEAF: f32 = 523.0;
pub const TONE_KEY: f32 = 660.0;
pub const TONE_WORD: f32 = 700.0;
pub const TONE_CHOICE: f32 = 587.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
