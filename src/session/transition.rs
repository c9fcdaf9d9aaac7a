//! Session transition function
//!
//! The only code that mutates a [`Session`]. Takes one event, validates it
//! against the current phase and generation, mutates the session, and returns
//! the side effects (delayed events, countdown commands) for the driver to run.

use super::state::{Generation, Lane, Outcome, Phase, PhaseKind, Session};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::settings::Settings;

/// Everything that can happen to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Player jumped to a lane
    ChoiceMade(Lane),
    /// Jump animation finished; score the choice
    ResolutionWindowElapsed(Generation),
    /// Forward movement finished; load the next level
    AdvanceWindowElapsed(Generation),
    /// Countdown passed a whole second
    Tick { generation: Generation, remaining: u32 },
    /// Countdown reached zero
    TimerExpired(Generation),
    /// Throw the session away and start over
    Restart,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::ChoiceMade(_) => "ChoiceMade",
            Event::ResolutionWindowElapsed(_) => "ResolutionWindowElapsed",
            Event::AdvanceWindowElapsed(_) => "AdvanceWindowElapsed",
            Event::Tick { .. } => "Tick",
            Event::TimerExpired(_) => "TimerExpired",
            Event::Restart => "Restart",
        }
    }

    /// Generation a delayed event was scheduled for (input events have none)
    pub fn generation(&self) -> Option<Generation> {
        match *self {
            Event::ResolutionWindowElapsed(generation)
            | Event::AdvanceWindowElapsed(generation)
            | Event::Tick { generation, .. }
            | Event::TimerExpired(generation) => Some(generation),
            Event::ChoiceMade(_) | Event::Restart => None,
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `event` after `delay_ms`
    Schedule { delay_ms: u64, event: Event },
    PauseTimer,
    /// Restart the countdown with a full budget
    ResetTimer { budget_secs: u32 },
    StopTimer,
    /// The run just ended
    Finished(Outcome),
}

/// Event the session could not accept; absorbed as a no-op
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTransition {
    #[error("{event} ignored while {phase}")]
    OutOfPhase {
        event: &'static str,
        phase: &'static str,
    },

    #[error("{event} scheduled for generation {scheduled} ignored by generation {current}")]
    Stale {
        event: &'static str,
        scheduled: u64,
        current: u64,
    },
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Applied(Vec<Effect>),
    Ignored(InvalidTransition),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }

    pub fn effects(&self) -> &[Effect] {
        match self {
            Transition::Applied(effects) => effects,
            Transition::Ignored(_) => &[],
        }
    }
}

/// Apply one event to the session
///
/// Out-of-phase and stale events leave the session untouched and come back
/// as `Transition::Ignored`. Errors are reserved for catalog misuse, which the
/// catalog invariants make unreachable.
pub fn apply(
    session: &mut Session,
    catalog: &Catalog,
    settings: &Settings,
    event: Event,
) -> Result<Transition> {
    if let Some(scheduled) = event.generation() {
        if scheduled != session.generation {
            let rejection = InvalidTransition::Stale {
                event: event.name(),
                scheduled: scheduled.0,
                current: session.generation.0,
            };
            log::debug!("{rejection}");
            return Ok(Transition::Ignored(rejection));
        }
    }

    let transition = match (session.phase, event) {
        (_, Event::Restart) => restart(session, settings),

        (Phase::AwaitingChoice, Event::ChoiceMade(lane)) => {
            session.phase = Phase::Resolving { lane };
            session.player_lane = lane;
            Transition::Applied(vec![
                Effect::PauseTimer,
                Effect::Schedule {
                    delay_ms: settings.resolution_window_ms,
                    event: Event::ResolutionWindowElapsed(session.generation),
                },
            ])
        }

        (Phase::Resolving { lane }, Event::ResolutionWindowElapsed(_)) => {
            resolve(session, catalog, settings, lane)?
        }

        (Phase::AdvancingLevel, Event::AdvanceWindowElapsed(_)) => {
            let next = session.level_index + 1;
            catalog.get(next)?;
            session.level_index = next;
            session.phase = Phase::AwaitingChoice;
            session.player_lane = Lane::START;
            session.time_remaining = settings.time_budget_secs;
            log::info!("Level {} of {}", next + 1, catalog.len());
            Transition::Applied(vec![Effect::ResetTimer {
                budget_secs: settings.time_budget_secs,
            }])
        }

        (Phase::AwaitingChoice, Event::Tick { remaining, .. }) => {
            session.time_remaining = remaining.min(session.time_remaining);
            Transition::Applied(Vec::new())
        }

        (Phase::AwaitingChoice, Event::TimerExpired(_)) => {
            session.time_remaining = 0;
            log::info!("Out of time on level {}", session.level_index + 1);
            end(session, Outcome::Lost)
        }

        (phase, event) => {
            let rejection = InvalidTransition::OutOfPhase {
                event: event.name(),
                phase: phase.kind().as_str(),
            };
            log::debug!("{rejection}");
            Transition::Ignored(rejection)
        }
    };

    Ok(transition)
}

/// Score the lane chosen on the current level
fn resolve(
    session: &mut Session,
    catalog: &Catalog,
    settings: &Settings,
    lane: Lane,
) -> Result<Transition> {
    let question = catalog.get(session.level_index)?;
    if !question.option(lane).correct {
        return Ok(end(session, Outcome::Lost));
    }

    session.score += 1;
    if session.level_index == catalog.last_index() {
        return Ok(end(session, Outcome::Won));
    }

    session.phase = Phase::AdvancingLevel;
    Ok(Transition::Applied(vec![Effect::Schedule {
        delay_ms: settings.advance_window_ms,
        event: Event::AdvanceWindowElapsed(session.generation),
    }]))
}

fn end(session: &mut Session, outcome: Outcome) -> Transition {
    session.phase = Phase::Ended { outcome };
    log::info!(
        "Run {:?} with score {} on level {}",
        outcome,
        session.score,
        session.level_index + 1
    );
    Transition::Applied(vec![Effect::StopTimer, Effect::Finished(outcome)])
}

fn restart(session: &mut Session, settings: &Settings) -> Transition {
    let was = session.phase.kind();
    *session = Session::new(session.generation.next(), settings.time_budget_secs);
    log::info!(
        "Restarted from {} (generation {})",
        was.as_str(),
        session.generation.0
    );
    Transition::Applied(vec![Effect::ResetTimer {
        budget_secs: settings.time_budget_secs,
    }])
}

/// Whether the avatar is mid-jump
pub fn is_jumping(session: &Session) -> bool {
    session.phase.kind() == PhaseKind::Resolving
}

/// Whether the avatar is moving forward: mid-jump onto the correct lane
pub fn is_moving_forward(session: &Session, catalog: &Catalog) -> Result<bool> {
    match session.phase {
        Phase::Resolving { lane } => Ok(catalog.get(session.level_index)?.option(lane).correct),
        _ => Ok(false),
    }
}
