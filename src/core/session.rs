//! Game session: the level/module state machine
//!
//! Per (module, level):
//! - NOT_STARTED → IN_PROGRESS: start action (or auto-start on advance)
//! - IN_PROGRESS → COMPLETED: the scoring event that reaches the goal
//! - COMPLETED → next pair: advance action, per the transition table
//!
//! Voice and creation have no goal and never complete; advance leaves voice
//! at any time. Every transition bumps the epoch, clears transient state and
//! turns pending timers stale.

use tracing::{debug, info, warn};
use crate::LEAF_REFILL_THRESHOLD;
use crate::core::classifier::{self, Classification, Hit, LevelEntities};
use crate::core::collaborators::{Burst, Collaborators};
use crate::core::feedback::{self, FeedbackDispatcher};
use crate::core::reply::placeholder_reply;
use crate::core::scheduler::{Scheduled, Scheduler, TimerTask};
use crate::core::{GameConfig, ScoreTracker, Spawner, TransitionTable};
use crate::types::{
    GameError, GameEvent, InputEvent, LevelIndex, LevelState, ModuleId, Persona, ReasonCode,
    SessionSnapshot, StepOutput,
};

/// All state of one learner's session
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    transitions: TransitionTable,
    persona: Option<Persona>,
    module: ModuleId,
    level: LevelIndex,
    tracker: ScoreTracker,
    started: bool,
    completed: bool,
    entities: LevelEntities,
    /// Praise text and the token of its expiry timer
    praise: Option<(&'static str, u64)>,
    praise_seq: u64,
    milestone: Option<&'static str>,
    listening: bool,
    transcript: String,
    reply: Option<&'static str>,
    /// Prompt composed in the prompt module, handed to creation
    carried_prompt: Option<String>,
    generating: bool,
    image_url: Option<String>,
    /// Bumped on every transition; timers from older epochs are skipped
    epoch: u64,
    scheduler: Scheduler,
    spawner: Spawner,
    collaborators: Collaborators,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default(), Collaborators::silent())
    }
}

impl GameSession {
    /// Create a session waiting for persona selection
    pub fn new(config: GameConfig, collaborators: Collaborators) -> Self {
        let spawner = match config.seed {
            Some(seed) => Spawner::seeded(seed),
            None => Spawner::from_entropy(),
        };
        Self {
            config,
            transitions: TransitionTable::standard(),
            persona: None,
            module: ModuleId::Pointer,
            level: 1,
            tracker: ScoreTracker::new(),
            started: false,
            completed: false,
            entities: LevelEntities::default(),
            praise: None,
            praise_seq: 0,
            milestone: None,
            listening: false,
            transcript: String::new(),
            reply: None,
            carried_prompt: None,
            generating: false,
            image_url: None,
            epoch: 0,
            scheduler: Scheduler::new(),
            spawner,
            collaborators,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn persona(&self) -> Option<Persona> {
        self.persona
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    pub fn level(&self) -> LevelIndex {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn level_state(&self) -> LevelState {
        LevelState::from_flags(self.started, self.completed)
    }

    /// Goal of the active pair, None for free-form modules
    pub fn goal(&self) -> Option<u32> {
        self.config.goals.lookup(self.module, self.level)
    }

    pub fn entities(&self) -> &LevelEntities {
        &self.entities
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// A leaf refill is queued for the live level
    pub fn refill_pending(&self) -> bool {
        self.scheduler.has_pending(self.epoch, &TimerTask::RefillLeaves)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let prompt = &self.entities.prompt;
        SessionSnapshot {
            persona: self.persona,
            module: self.module,
            level: self.level,
            score: self.score(),
            goal: self.goal(),
            state: self.level_state(),
            praise: self.praise.map(|(text, _)| text.to_string()),
            milestone: self.milestone.map(str::to_string),
            live_blooms: self.entities.live_blooms(),
            leaves_left: self.entities.leaves_left(),
            target_key: self.entities.target_key,
            target_word: self.entities.target_word.map(str::to_string),
            text_buffer: self.entities.buffer.clone(),
            mission_index: (self.module == ModuleId::Prompt && self.started)
                .then_some(prompt.mission_index),
            selections: prompt.selections.clone(),
            listening: self.listening,
            transcript: self.transcript.clone(),
            reply: self.reply.map(str::to_string),
            generating: self.generating,
            image_url: self.image_url.clone(),
        }
    }

    fn output(&self, reason: ReasonCode, events: Vec<GameEvent>) -> StepOutput {
        StepOutput::new(reason, events, self.snapshot())
    }

    fn require_persona(&self) -> Result<Persona, GameError> {
        self.persona.ok_or(GameError::PersonaNotSelected)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Choose the persona; fixed until [`reset`](Self::reset)
    pub fn select_persona(&mut self, persona: Persona) -> Result<StepOutput, GameError> {
        if let Some(existing) = self.persona {
            return Err(GameError::PersonaAlreadySelected(existing));
        }
        self.persona = Some(persona);
        self.started = self.module.always_started();
        FeedbackDispatcher::say(persona, feedback::greeting_line(persona), &mut self.collaborators);
        info!(%persona, "persona selected");
        Ok(self.output(ReasonCode::R004_PERSONA_SELECTED, Vec::new()))
    }

    /// Learner's start action
    pub fn start(&mut self) -> Result<StepOutput, GameError> {
        let persona = self.require_persona()?;
        if self.started {
            return Ok(self.output(ReasonCode::R004_ALREADY_STARTED, Vec::new()));
        }
        self.started = true;
        FeedbackDispatcher::say(persona, feedback::START_LINE, &mut self.collaborators);
        let mut events = Vec::new();
        self.seed(persona, &mut events);
        info!(module = %self.module, level = self.level, "level started");
        Ok(self.output(ReasonCode::R004_STARTED, events))
    }

    /// Learner's advance action
    pub fn advance(&mut self) -> Result<StepOutput, GameError> {
        let persona = self.require_persona()?;
        if self.module.is_goal_bounded() && !self.completed {
            debug!(module = %self.module, level = self.level, "advance before completion ignored");
            return Ok(self.output(ReasonCode::R004_NOT_ADVANCEABLE, Vec::new()));
        }
        let Some(next) = self.transitions.next(self.module, self.level, persona)? else {
            return Ok(self.output(ReasonCode::R004_NOT_ADVANCEABLE, Vec::new()));
        };

        let carried = if self.module == ModuleId::Prompt && next.module == ModuleId::Creation {
            self.carried_prompt.take()
        } else {
            None
        };
        let (from, from_level) = (self.module, self.level);
        self.clear_transient();
        self.carried_prompt = carried;
        self.module = next.module;
        self.level = next.level;
        self.started = next.auto_start || next.module.always_started();

        let mut events = vec![GameEvent::Transitioned {
            from,
            from_level,
            to: next.module,
            to_level: next.level,
            auto_started: self.started,
        }];
        if self.started {
            self.seed(persona, &mut events);
        }
        FeedbackDispatcher::say(
            persona,
            feedback::arrival_line(persona, next.module, next.level),
            &mut self.collaborators,
        );
        info!(from = %from, from_level, to = %next.module, to_level = next.level, "advanced");
        Ok(self.output(ReasonCode::R004_TRANSITIONED, events))
    }

    /// Manual navigation to a module's first level, bypassing the transition table
    pub fn jump_to(&mut self, module: ModuleId) -> Result<StepOutput, GameError> {
        self.jump_to_level(module, 1)
    }

    /// Manual navigation to any (module, level); the level waits for start
    pub fn jump_to_level(&mut self, module: ModuleId, level: LevelIndex) -> Result<StepOutput, GameError> {
        let persona = self.require_persona()?;
        if level == 0 || level > module.level_count() {
            return Err(GameError::NoSuchLevel { module, level });
        }
        let (from, from_level) = (self.module, self.level);
        self.clear_transient();
        self.module = module;
        self.level = level;
        self.started = module.always_started();
        FeedbackDispatcher::say(persona, feedback::arrival_line(persona, module, level), &mut self.collaborators);
        info!(from = %from, to = %module, level, "jumped");
        let events = vec![GameEvent::Transitioned {
            from,
            from_level,
            to: module,
            to_level: level,
            auto_started: self.started,
        }];
        Ok(self.output(ReasonCode::R004_JUMPED, events))
    }

    /// Restart the current level, keeping module and level
    ///
    /// Goal levels go back to the start gate; free-form modules stay open.
    pub fn restart_current(&mut self) -> Result<StepOutput, GameError> {
        self.require_persona()?;
        self.clear_transient();
        self.started = self.module.always_started();
        info!(module = %self.module, level = self.level, "level restarted");
        Ok(self.output(ReasonCode::R004_RESTARTED, Vec::new()))
    }

    /// Back to persona selection
    pub fn reset(&mut self) -> StepOutput {
        self.clear_transient();
        self.persona = None;
        self.module = ModuleId::Pointer;
        self.level = 1;
        self.started = false;
        info!("session reset");
        self.output(ReasonCode::R004_RESET, Vec::new())
    }

    /// Drop everything owned by the active level
    fn clear_transient(&mut self) {
        self.epoch += 1;
        self.tracker.reset();
        self.completed = false;
        self.entities.clear();
        self.praise = None;
        self.milestone = None;
        self.listening = false;
        self.transcript.clear();
        self.reply = None;
        self.carried_prompt = None;
        self.generating = false;
        self.image_url = None;
    }

    /// Seed the entities a freshly started level needs
    fn seed(&mut self, persona: Persona, events: &mut Vec<GameEvent>) {
        match (self.module, self.level) {
            (ModuleId::Pointer, 1) => {
                let id = self.spawner.spawn_bloom(&mut self.entities.blooms);
                events.push(GameEvent::BloomSpawned { id });
            }
            (ModuleId::Pointer, _) => {
                self.entities.leaves = self.spawner.spawn_leaves(self.config.leaf_batch_size);
                events.push(GameEvent::LeavesSpawned { count: self.entities.leaves.len() });
            }
            (ModuleId::Keyboard, 1) => self.next_key(events),
            (ModuleId::Keyboard, _) => self.next_word(persona, events),
            (ModuleId::Prompt, _) => self.entities.prompt.clear(),
            (ModuleId::Voice, _) | (ModuleId::Creation, _) => {}
        }
    }

    fn next_key(&mut self, events: &mut Vec<GameEvent>) {
        let key = self.spawner.spawn_key();
        self.entities.target_key = Some(key);
        self.entities.buffer.clear();
        events.push(GameEvent::KeySelected { key });
    }

    fn next_word(&mut self, persona: Persona, events: &mut Vec<GameEvent>) {
        let word = self.spawner.spawn_word(persona);
        self.entities.target_word = Some(word);
        self.entities.buffer.clear();
        events.push(GameEvent::WordSelected { word: word.to_string() });
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Classify and apply one raw input event
    pub fn handle(&mut self, event: InputEvent) -> Result<StepOutput, GameError> {
        let persona = self.require_persona()?;

        // Typed description in the creation module
        if let (InputEvent::TextChanged { value }, ModuleId::Creation) = (&event, self.module) {
            self.transcript = value.clone();
            return Ok(self.output(ReasonCode::R006_TRANSCRIPT, Vec::new()));
        }

        let applies = matches!(
            (&event, self.module, self.level),
            (InputEvent::Click { .. }, ModuleId::Pointer, 1)
                | (InputEvent::DragRelease { .. }, ModuleId::Pointer, 2)
                | (InputEvent::KeyDown { .. }, ModuleId::Keyboard, _)
                | (InputEvent::TextChanged { .. }, ModuleId::Keyboard, _)
                | (InputEvent::ChooseOption { .. }, ModuleId::Prompt, _)
        );
        if !applies {
            return Ok(self.ignore(ReasonCode::R002_WRONG_MODULE, &event));
        }
        if let Err(reason) = classifier::gate(self.started, self.completed) {
            return Ok(self.ignore(reason, &event));
        }

        let level = self.level;
        let classification = match &event {
            InputEvent::Click { id } => classifier::click(&mut self.entities, *id),
            InputEvent::DragRelease { id, x, y } => {
                classifier::drag_release(&mut self.entities, &self.config, *id, *x, *y)
            }
            InputEvent::KeyDown { key } => classifier::key_down(&mut self.entities, level, key),
            InputEvent::TextChanged { value } => classifier::text_changed(&mut self.entities, level, value),
            InputEvent::ChooseOption { index } => classifier::choose(&mut self.entities, *index),
        };

        match classification {
            Classification::Ignored(reason) => Ok(self.ignore(reason, &event)),
            Classification::Update(reason) => {
                let mut events = Vec::new();
                if reason == ReasonCode::R007_MISSION_ANSWERED {
                    self.push_mission_answered(&mut events);
                }
                Ok(self.output(reason, events))
            }
            Classification::Score(hit) => self.score_hit(persona, hit),
        }
    }

    fn ignore(&self, reason: ReasonCode, event: &InputEvent) -> StepOutput {
        debug!(reason = reason.code(), ?event, "input ignored");
        self.output(reason, Vec::new())
    }

    fn push_mission_answered(&self, events: &mut Vec<GameEvent>) {
        let selections = &self.entities.prompt.selections;
        if let Some(choice) = selections.last() {
            events.push(GameEvent::MissionAnswered {
                mission: selections.len() - 1,
                choice: choice.clone(),
            });
        }
    }

    /// Apply a validated scoring event
    fn score_hit(&mut self, persona: Persona, hit: Hit) -> Result<StepOutput, GameError> {
        let goal = self.config.goals.goal(self.module, self.level)?;
        let mut events = Vec::new();

        self.collaborators.sound.play_tone(hit.tone(self.tracker.score()));
        let update = self.tracker.apply(1, goal);
        if let Hit::Round(prompt) = &hit {
            self.push_mission_answered(&mut events);
            events.push(GameEvent::RoundCompleted { prompt: prompt.clone() });
            self.carried_prompt = Some(prompt.clone());
        }
        events.push(GameEvent::Scored {
            amount: 1,
            score: update.score,
            goal,
        });

        match &hit {
            Hit::Bloom(id) => {
                self.scheduler.schedule(
                    self.config.bloom_respawn_ms,
                    self.epoch,
                    TimerTask::ReplaceBloom { id: *id },
                );
            }
            Hit::Leaf(_) => {
                if self.entities.leaves_left() <= LEAF_REFILL_THRESHOLD && !self.refill_pending() {
                    self.scheduler.schedule(self.config.leaf_refill_ms, self.epoch, TimerTask::RefillLeaves);
                }
            }
            Hit::Key if !update.goal_reached => self.next_key(&mut events),
            Hit::Word if !update.goal_reached => self.next_word(persona, &mut events),
            Hit::Round(_) if !update.goal_reached => self.entities.prompt.clear(),
            Hit::Key | Hit::Word | Hit::Round(_) => {}
        }

        if update.goal_reached {
            self.complete_level(persona, &mut events);
            Ok(self.output(ReasonCode::R001_GOAL_REACHED, events))
        } else {
            self.give_praise(persona, &mut events);
            Ok(self.output(ReasonCode::R001_SCORED, events))
        }
    }

    fn complete_level(&mut self, persona: Persona, events: &mut Vec<GameEvent>) {
        self.completed = true;
        if self.praise.take().is_some() {
            events.push(GameEvent::PraiseCleared);
        }
        let line = FeedbackDispatcher::milestone(persona, &mut self.collaborators);
        self.milestone = Some(line);
        events.push(GameEvent::GoalReached {
            module: self.module,
            level: self.level,
            score: self.score(),
        });
        events.push(GameEvent::MilestoneShown { text: line.to_string() });
        info!(module = %self.module, level = self.level, score = self.score(), "level completed");
    }

    fn give_praise(&mut self, persona: Persona, events: &mut Vec<GameEvent>) {
        let phrase = FeedbackDispatcher::pick_praise(persona, &mut self.spawner);
        self.praise_seq += 1;
        let token = self.praise_seq;
        self.praise = Some((phrase, token));
        FeedbackDispatcher::praise(persona, phrase, &mut self.collaborators);
        self.scheduler.schedule(self.config.praise_ms, self.epoch, TimerTask::ExpirePraise { token });
        events.push(GameEvent::PraiseShown { text: phrase.to_string() });
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Advance the clock, firing due timers in due order
    pub fn tick(&mut self, elapsed_ms: u64) -> StepOutput {
        let until = self.scheduler.now_ms() + elapsed_ms;
        let mut events = Vec::new();
        while let Some(scheduled) = self.scheduler.pop_due(until) {
            self.fire(scheduled, &mut events);
        }
        self.scheduler.set_now(until);
        self.output(ReasonCode::R005_CLOCK_ADVANCED, events)
    }

    fn fire(&mut self, scheduled: Scheduled, events: &mut Vec<GameEvent>) {
        if scheduled.epoch != self.epoch {
            debug!(task = ?scheduled.task, epoch = scheduled.epoch, live = self.epoch, "stale timer skipped");
            return;
        }
        match scheduled.task {
            TimerTask::ReplaceBloom { id } => {
                self.entities.blooms.retain(|b| b.id != id);
                if self.started && !self.completed {
                    let id = self.spawner.spawn_bloom(&mut self.entities.blooms);
                    events.push(GameEvent::BloomSpawned { id });
                }
            }
            TimerTask::RefillLeaves => {
                if self.started && !self.completed {
                    self.entities.leaves = self.spawner.spawn_leaves(self.config.leaf_batch_size);
                    events.push(GameEvent::LeavesSpawned { count: self.entities.leaves.len() });
                }
            }
            TimerTask::ExpirePraise { token } => {
                if matches!(self.praise, Some((_, live)) if live == token) {
                    self.praise = None;
                    events.push(GameEvent::PraiseCleared);
                }
            }
            TimerTask::FinishCreation { prompt } => self.finish_creation(&prompt, events),
        }
    }

    // =========================================================================
    // Voice
    // =========================================================================

    /// Ask the speech-input collaborator to listen; start-once
    pub fn start_listening(&mut self) -> Result<StepOutput, GameError> {
        self.require_persona()?;
        if !matches!(self.module, ModuleId::Voice | ModuleId::Creation) {
            return Ok(self.output(ReasonCode::R002_WRONG_MODULE, Vec::new()));
        }
        if self.listening {
            return Ok(self.output(ReasonCode::R006_ALREADY_LISTENING, Vec::new()));
        }
        if !self.collaborators.listener.start_listening() {
            warn!("speech input unavailable");
            return Ok(self.output(ReasonCode::R006_SPEECH_UNAVAILABLE, Vec::new()));
        }
        self.listening = true;
        Ok(self.output(
            ReasonCode::R006_LISTENING,
            vec![GameEvent::ListeningChanged { listening: true }],
        ))
    }

    /// Speech-input result callback
    pub fn receive_transcript(&mut self, text: &str) -> Result<StepOutput, GameError> {
        let persona = self.require_persona()?;
        if !self.listening {
            debug!("transcript arrived while not listening");
            return Ok(self.output(ReasonCode::R006_LISTENING_ENDED, Vec::new()));
        }
        self.transcript = text.to_string();
        let mut events = vec![GameEvent::TranscriptReceived { text: text.to_string() }];
        if self.module == ModuleId::Voice {
            self.reply = placeholder_reply(persona, text);
            if let Some(reply) = self.reply {
                FeedbackDispatcher::say(persona, reply, &mut self.collaborators);
                events.push(GameEvent::ReplySpoken { text: reply.to_string() });
            }
        }
        Ok(self.output(ReasonCode::R006_TRANSCRIPT, events))
    }

    /// Speech-input end callback
    pub fn stop_listening(&mut self) -> StepOutput {
        if !self.listening {
            return self.output(ReasonCode::R006_LISTENING_ENDED, Vec::new());
        }
        self.listening = false;
        self.output(
            ReasonCode::R006_LISTENING_ENDED,
            vec![GameEvent::ListeningChanged { listening: false }],
        )
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Turn the transcript (or the composed prompt) into an image
    pub fn request_creation(&mut self) -> Result<StepOutput, GameError> {
        let persona = self.require_persona()?;
        if self.module != ModuleId::Creation {
            return Ok(self.output(ReasonCode::R002_WRONG_MODULE, Vec::new()));
        }
        if self.generating {
            return Ok(self.output(ReasonCode::R006_GENERATING, Vec::new()));
        }
        let typed = self.transcript.trim();
        let prompt = if typed.is_empty() {
            self.carried_prompt.clone()
        } else {
            Some(typed.to_string())
        };
        let Some(prompt) = prompt else {
            return Ok(self.output(ReasonCode::R006_NOTHING_TO_CREATE, Vec::new()));
        };

        self.generating = true;
        self.image_url = None;
        FeedbackDispatcher::say(persona, feedback::generating_line(persona), &mut self.collaborators);
        self.scheduler.schedule(
            self.config.generation_ms,
            self.epoch,
            TimerTask::FinishCreation { prompt: prompt.clone() },
        );
        info!(%prompt, "image generation requested");
        Ok(self.output(ReasonCode::R006_GENERATING, vec![GameEvent::CreationStarted { prompt }]))
    }

    fn finish_creation(&mut self, prompt: &str, events: &mut Vec<GameEvent>) {
        self.generating = false;
        let Some(persona) = self.persona else {
            return;
        };
        match self.collaborators.images.generate(prompt) {
            Ok(image) => {
                FeedbackDispatcher::say(persona, feedback::creation_done_line(persona), &mut self.collaborators);
                self.collaborators.celebration.burst(Burst::Creation);
                events.push(GameEvent::CreationReady { image_url: image.image_url.clone() });
                self.image_url = Some(image.image_url);
            }
            Err(e) => {
                warn!(error = %e, "image generation failed");
                events.push(GameEvent::CreationFailed);
            }
        }
    }

    // =========================================================================
    // Misc
    // =========================================================================

    /// The helper mascot speaks its tip
    pub fn ask_help(&mut self) -> Result<StepOutput, GameError> {
        let persona = self.require_persona()?;
        FeedbackDispatcher::say(persona, feedback::help_line(persona), &mut self.collaborators);
        Ok(self.output(ReasonCode::R007_STATUS, Vec::new()))
    }

    /// Current state without changing anything
    pub fn status(&self) -> StepOutput {
        self.output(ReasonCode::R007_STATUS, Vec::new())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityId;

    fn session(persona: Persona) -> GameSession {
        let config = GameConfig {
            seed: Some(17),
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config, Collaborators::silent());
        session.select_persona(persona).unwrap();
        session
    }

    fn live_bloom(session: &GameSession) -> EntityId {
        session
            .entities()
            .blooms
            .iter()
            .find(|b| !b.is_bloomed)
            .map(|b| b.id)
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let session = GameSession::default();
        assert_eq!(session.persona(), None);
        assert_eq!(session.module(), ModuleId::Pointer);
        assert_eq!(session.level(), 1);
        assert_eq!(session.level_state(), LevelState::NotStarted);
    }

    #[test]
    fn test_input_before_persona_is_an_error() {
        let mut session = GameSession::default();
        assert_eq!(
            session.handle(InputEvent::Click { id: EntityId(1) }).unwrap_err(),
            GameError::PersonaNotSelected
        );
        assert_eq!(session.start().unwrap_err(), GameError::PersonaNotSelected);
    }

    #[test]
    fn test_persona_is_fixed_until_reset() {
        let mut session = session(Persona::Child);
        assert_eq!(
            session.select_persona(Persona::Elder).unwrap_err(),
            GameError::PersonaAlreadySelected(Persona::Child)
        );
        session.reset();
        assert!(session.select_persona(Persona::Elder).is_ok());
    }

    #[test]
    fn test_start_seeds_one_bloom() {
        let mut session = session(Persona::Elder);
        let out = session.start().unwrap();
        assert_eq!(out.reason, ReasonCode::R004_STARTED);
        assert_eq!(session.entities().live_blooms(), 1);
        assert_eq!(session.start().unwrap().reason, ReasonCode::R004_ALREADY_STARTED);
    }

    #[test]
    fn test_click_before_start_is_ignored() {
        let mut session = session(Persona::Elder);
        let out = session.handle(InputEvent::Click { id: EntityId(1) }).unwrap();
        assert_eq!(out.reason, ReasonCode::R002_NOT_STARTED);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_bloom_replacement_after_delay() {
        let mut session = session(Persona::Elder);
        session.start().unwrap();
        let id = live_bloom(&session);
        session.handle(InputEvent::Click { id }).unwrap();
        assert_eq!(session.entities().live_blooms(), 0);

        session.tick(799);
        assert_eq!(session.entities().live_blooms(), 0);
        session.tick(1);
        assert_eq!(session.entities().live_blooms(), 1);
        assert!(session.entities().blooms.iter().all(|b| b.id != id));
    }

    #[test]
    fn test_praise_expires_and_restarts() {
        let mut session = session(Persona::Child);
        session.start().unwrap();
        let first = live_bloom(&session);
        session.handle(InputEvent::Click { id: first }).unwrap();
        assert!(session.snapshot().praise.is_some());

        session.tick(900);
        let second = live_bloom(&session);
        session.handle(InputEvent::Click { id: second }).unwrap();
        // First praise timer fires at 1000 but the text was replaced
        session.tick(200);
        assert!(session.snapshot().praise.is_some());
        session.tick(800);
        assert!(session.snapshot().praise.is_none());
    }

    #[test]
    fn test_advance_requires_completion() {
        let mut session = session(Persona::Elder);
        session.start().unwrap();
        assert_eq!(session.advance().unwrap().reason, ReasonCode::R004_NOT_ADVANCEABLE);
        assert_eq!(session.module(), ModuleId::Pointer);
    }

    #[test]
    fn test_jump_bypasses_table() {
        let mut session = session(Persona::Elder);
        let out = session.jump_to(ModuleId::Creation).unwrap();
        assert_eq!(out.reason, ReasonCode::R004_JUMPED);
        assert_eq!(session.module(), ModuleId::Creation);
        assert!(session.is_started());

        session.jump_to(ModuleId::Keyboard).unwrap();
        assert_eq!(session.level(), 1);
        assert_eq!(session.level_state(), LevelState::NotStarted);
    }

    #[test]
    fn test_restart_returns_to_start_gate() {
        let mut session = session(Persona::Elder);
        session.start().unwrap();
        let id = live_bloom(&session);
        session.handle(InputEvent::Click { id }).unwrap();
        let epoch = session.epoch();

        let out = session.restart_current().unwrap();
        assert_eq!(out.reason, ReasonCode::R004_RESTARTED);
        assert_eq!(session.score(), 0);
        assert_eq!(session.module(), ModuleId::Pointer);
        assert_eq!(session.level_state(), LevelState::NotStarted);
        assert!(session.entities().blooms.is_empty());
        assert!(session.epoch() > epoch);

        session.start().unwrap();
        assert_eq!(session.entities().live_blooms(), 1);
    }

    #[test]
    fn test_restart_keeps_free_form_modules_open() {
        let mut session = session(Persona::Child);
        session.jump_to(ModuleId::Creation).unwrap();
        session.restart_current().unwrap();
        assert!(session.is_started());
        assert_eq!(session.module(), ModuleId::Creation);
    }

    #[test]
    fn test_jump_to_level_checks_level_count() {
        let mut session = session(Persona::Child);
        let out = session.jump_to_level(ModuleId::Keyboard, 2).unwrap();
        assert_eq!(out.snapshot.level, 2);
        assert_eq!(session.level_state(), LevelState::NotStarted);
        assert_eq!(
            session.jump_to_level(ModuleId::Prompt, 2).unwrap_err(),
            GameError::NoSuchLevel { module: ModuleId::Prompt, level: 2 }
        );
        assert_eq!(
            session.jump_to_level(ModuleId::Pointer, 0).unwrap_err(),
            GameError::NoSuchLevel { module: ModuleId::Pointer, level: 0 }
        );
        assert_eq!(session.module(), ModuleId::Keyboard);
    }

    #[test]
    fn test_listening_is_start_once_and_needs_a_device() {
        let mut session = session(Persona::Elder);
        session.jump_to(ModuleId::Voice).unwrap();
        // Silent collaborators have no microphone
        assert_eq!(session.start_listening().unwrap().reason, ReasonCode::R006_SPEECH_UNAVAILABLE);
        assert!(!session.snapshot().listening);
    }

    #[test]
    fn test_creation_needs_a_prompt() {
        let mut session = session(Persona::Child);
        session.jump_to(ModuleId::Creation).unwrap();
        assert_eq!(session.request_creation().unwrap().reason, ReasonCode::R006_NOTHING_TO_CREATE);

        session.handle(InputEvent::TextChanged { value: "노란 고양이".into() }).unwrap();
        assert_eq!(session.request_creation().unwrap().reason, ReasonCode::R006_GENERATING);
        assert_eq!(session.request_creation().unwrap().reason, ReasonCode::R006_GENERATING);
        assert_eq!(session.pending_timers(), 1);

        let out = session.tick(3000);
        assert!(!out.snapshot.generating);
        let url = out.snapshot.image_url.unwrap();
        assert!(url.starts_with("https://picsum.photos/seed/"));
        assert!(url.contains("%20"));
    }
}
