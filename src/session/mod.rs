//! Session state machine
//!
//! All gameplay rules live here. This module must stay pure:
//! - No clocks, threads or IO
//! - State changes only through `apply`
//! - Delayed events are validated against the session generation

pub mod state;
pub mod transition;

pub use state::{Generation, Lane, Outcome, Phase, PhaseKind, Session};
pub use transition::{
    Effect, Event, InvalidTransition, Transition, apply, is_jumping, is_moving_forward,
};
