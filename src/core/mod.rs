//! Core game logic

pub mod goals;
pub mod transitions;
pub mod config;
pub mod spawner;
pub mod tracker;
pub mod scheduler;
pub mod classifier;
pub mod collaborators;
pub mod feedback;
pub mod reply;
pub mod session;
pub mod progress;
pub mod api;

pub use goals::GoalTable;
pub use transitions::{Transition, TransitionTable};
pub use config::GameConfig;
pub use spawner::Spawner;
pub use tracker::{ScoreTracker, ScoreUpdate};
pub use scheduler::{Scheduled, Scheduler, TimerTask};
pub use classifier::{Classification, Hit, LevelEntities};
pub use collaborators::{
    Burst, Celebration, Collaborators, GeneratedImage, ImageGenerator, PlaceholderImages, Silent,
    SoundCue, SpeechInput, SpeechOutput,
};
pub use feedback::FeedbackDispatcher;
pub use reply::placeholder_reply;
pub use session::GameSession;
pub use progress::{ProgressStore, UserProgress, DEMO_USER_ID};
pub use api::{create_router, create_router_with, run_server};
