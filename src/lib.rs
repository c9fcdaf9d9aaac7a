//! Code Hop - A lane-jumping code-completion quiz
//!
//! Core modules:
//! - `catalog`: Fixed, validated list of questions
//! - `timer`: Per-level countdown driven by a logical clock
//! - `session`: Session state and its transition function
//! - `input`: Raw key to event routing
//! - `game`: Single-threaded driver tying it all together
//! - `view`: Read-only snapshots and stage geometry for renderers

pub mod catalog;
pub mod error;
pub mod game;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod timer;
pub mod view;

pub use catalog::{AnswerOption, Catalog, Question};
pub use error::{Error, Result};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of lanes (and options per question)
    pub const LANE_COUNT: usize = 3;
    /// Lane the avatar stands on at the start of every level
    pub const START_LANE: u8 = 1;

    /// Seconds on the clock at the start of every level
    pub const TIME_BUDGET_SECS: u32 = 15;
    /// Countdown granularity
    pub const TICK_MS: u64 = 1000;

    /// Jump animation between a choice and its scoring
    pub const RESOLUTION_WINDOW_MS: u64 = 800;
    /// Forward movement between a correct answer and the next level
    pub const ADVANCE_WINDOW_MS: u64 = 1500;
}
