//! Session state and core value types
//!
//! A `Session` is one playthrough. It is created on start, replaced wholesale
//! on restart, and only ever mutated by [`super::apply`].

use serde::{Deserialize, Serialize};

use crate::consts::{LANE_COUNT, START_LANE};

/// One of the three lanes a player can jump to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Lane(u8);

impl Lane {
    pub const FIRST: Lane = Lane(0);
    pub const SECOND: Lane = Lane(1);
    pub const THIRD: Lane = Lane(2);
    /// Where the avatar stands when a level begins
    pub const START: Lane = Lane(START_LANE);

    /// Lane at `index`, or `None` outside `0..LANE_COUNT`
    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < LANE_COUNT).then_some(Lane(index))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> [Lane; LANE_COUNT] {
        [Lane::FIRST, Lane::SECOND, Lane::THIRD]
    }
}

impl TryFrom<u8> for Lane {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Lane::new(index).ok_or_else(|| format!("lane {index} out of range"))
    }
}

impl From<Lane> for u8 {
    fn from(lane: Lane) -> u8 {
        lane.0
    }
}

/// Identity of a session instance; bumped on every restart
///
/// Delayed events carry the generation they were scheduled for and are
/// dropped if it no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub const FIRST: Generation = Generation(0);

    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Answered the final level correctly
    Won,
    /// Wrong answer or ran out of time
    Lost,
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a lane; the clock is running
    AwaitingChoice,
    /// Jumping to the chosen lane; input and clock suspended
    Resolving { lane: Lane },
    /// Moving forward after a correct answer; input and clock suspended
    AdvancingLevel,
    /// Run over
    Ended { outcome: Outcome },
}

/// Payload-free phase tag for renderers and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    AwaitingChoice,
    Resolving,
    AdvancingLevel,
    Ended,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::AwaitingChoice => "awaiting choice",
            PhaseKind::Resolving => "resolving",
            PhaseKind::AdvancingLevel => "advancing level",
            PhaseKind::Ended => "ended",
        }
    }
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::AwaitingChoice => PhaseKind::AwaitingChoice,
            Phase::Resolving { .. } => PhaseKind::Resolving,
            Phase::AdvancingLevel => PhaseKind::AdvancingLevel,
            Phase::Ended { .. } => PhaseKind::Ended,
        }
    }
}

/// Complete state of one playthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Instance identity for invalidating delayed events
    pub(crate) generation: Generation,
    /// Correct answers so far
    pub(crate) score: u32,
    /// Current level (0-based)
    pub(crate) level_index: usize,
    /// Current phase (carries the selected lane and the outcome)
    pub(crate) phase: Phase,
    /// Lane the avatar stands on
    pub(crate) player_lane: Lane,
    /// Whole seconds left for the current level
    pub(crate) time_remaining: u32,
}

impl Session {
    /// Fresh session at level 0 with a full clock
    pub fn new(generation: Generation, budget_secs: u32) -> Self {
        Self {
            generation,
            score: 0,
            level_index: 0,
            phase: Phase::AwaitingChoice,
            player_lane: Lane::START,
            time_remaining: budget_secs,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Lane being resolved; only set while `Resolving`
    pub fn selected_lane(&self) -> Option<Lane> {
        match self.phase {
            Phase::Resolving { lane } => Some(lane),
            _ => None,
        }
    }

    /// Outcome of the run; only set once `Ended`
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Ended { outcome } => Some(outcome),
            _ => None,
        }
    }

    pub fn player_lane(&self) -> Lane {
        self.player_lane
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended { .. })
    }

    /// True only while the player may choose a lane
    pub fn accepts_choice(&self) -> bool {
        self.phase == Phase::AwaitingChoice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TIME_BUDGET_SECS;

    #[test]
    fn test_new_session() {
        let session = Session::new(Generation::FIRST, TIME_BUDGET_SECS);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.phase(), Phase::AwaitingChoice);
        assert_eq!(session.selected_lane(), None);
        assert_eq!(session.outcome(), None);
        assert_eq!(session.player_lane(), Lane::SECOND);
        assert_eq!(session.time_remaining(), 15);
        assert!(session.accepts_choice());
    }

    #[test]
    fn test_lane_bounds() {
        assert_eq!(Lane::new(0), Some(Lane::FIRST));
        assert_eq!(Lane::new(2), Some(Lane::THIRD));
        assert_eq!(Lane::new(3), None);
        assert_eq!(Lane::all().map(Lane::index), [0, 1, 2]);
        assert!(Lane::try_from(7).is_err());
    }

    #[test]
    fn test_phase_carries_lane_and_outcome() {
        let mut session = Session::new(Generation::FIRST, TIME_BUDGET_SECS);

        session.phase = Phase::Resolving { lane: Lane::THIRD };
        assert_eq!(session.selected_lane(), Some(Lane::THIRD));
        assert_eq!(session.outcome(), None);
        assert_eq!(session.phase().kind(), PhaseKind::Resolving);

        session.phase = Phase::Ended {
            outcome: Outcome::Won,
        };
        assert_eq!(session.selected_lane(), None);
        assert_eq!(session.outcome(), Some(Outcome::Won));
        assert!(session.is_ended());
        assert!(!session.accepts_choice());
    }

    #[test]
    fn test_generation_is_monotonic() {
        let first = Generation::FIRST;
        assert!(first.next() > first);
        assert_eq!(first.next().next(), Generation(2));
    }
}
