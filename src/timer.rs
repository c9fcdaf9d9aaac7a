//! Per-level countdown
//!
//! Driven by elapsed milliseconds from the game clock rather than wall time,
//! so the same inputs always produce the same ticks.

use crate::consts::TICK_MS;
use crate::error::{Error, Result};

/// Emitted by [`Countdown::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A whole second elapsed; seconds left on the clock
    Tick(u32),
    /// The clock reached zero (emitted once, right after `Tick(0)`)
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountdownState {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Decrementing whole-second clock
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u32,
    /// Milliseconds accumulated toward the next tick
    carry_ms: u64,
    state: CountdownState,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining: 0,
            carry_ms: 0,
            state: CountdownState::Idle,
        }
    }

    /// Begin counting down from `budget_secs`
    ///
    /// Fails with `AlreadyRunning` while counting or paused; `reset` instead.
    pub fn start(&mut self, budget_secs: u32) -> Result<()> {
        if matches!(self.state, CountdownState::Running | CountdownState::Paused) {
            return Err(Error::AlreadyRunning);
        }
        self.reset(budget_secs)
    }

    /// Drop any partial second and restart with a fresh budget
    pub fn reset(&mut self, budget_secs: u32) -> Result<()> {
        if budget_secs == 0 {
            return Err(Error::EmptyBudget);
        }
        self.remaining = budget_secs;
        self.carry_ms = 0;
        self.state = CountdownState::Running;
        Ok(())
    }

    /// Suspend ticking, keeping the partial second
    pub fn pause(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == CountdownState::Paused {
            self.state = CountdownState::Running;
        }
    }

    /// Cancel without emitting anything
    pub fn stop(&mut self) {
        self.carry_ms = 0;
        self.state = CountdownState::Idle;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == CountdownState::Paused
    }

    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    /// Milliseconds until the next tick, if the countdown is running
    pub fn until_next_tick(&self) -> Option<u64> {
        self.is_running().then(|| TICK_MS - self.carry_ms)
    }

    /// Advance by `dt_ms`, returning every tick (and expiry) that fell inside it
    pub fn advance(&mut self, dt_ms: u64) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if !self.is_running() {
            return events;
        }

        self.carry_ms += dt_ms;
        while self.carry_ms >= TICK_MS {
            self.carry_ms -= TICK_MS;
            self.remaining = self.remaining.saturating_sub(1);
            events.push(TimerEvent::Tick(self.remaining));

            if self.remaining == 0 {
                events.push(TimerEvent::Expired);
                self.carry_ms = 0;
                self.state = CountdownState::Expired;
                break;
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_each_whole_second() {
        let mut countdown = Countdown::new();
        countdown.start(3).unwrap();

        assert!(countdown.advance(999).is_empty());
        assert_eq!(countdown.advance(1), vec![TimerEvent::Tick(2)]);
        assert_eq!(countdown.until_next_tick(), Some(1000));

        // A long step emits every tick it covers
        assert_eq!(
            countdown.advance(2500),
            vec![TimerEvent::Tick(1), TimerEvent::Tick(0), TimerEvent::Expired]
        );
        assert!(countdown.is_expired());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut countdown = Countdown::new();
        countdown.start(1).unwrap();
        assert_eq!(
            countdown.advance(1000),
            vec![TimerEvent::Tick(0), TimerEvent::Expired]
        );
        assert!(countdown.advance(10_000).is_empty());
        assert_eq!(countdown.until_next_tick(), None);
    }

    #[test]
    fn test_start_while_running_fails() {
        let mut countdown = Countdown::new();
        countdown.start(15).unwrap();
        assert!(matches!(countdown.start(15), Err(Error::AlreadyRunning)));

        countdown.pause();
        assert!(matches!(countdown.start(15), Err(Error::AlreadyRunning)));

        // Reset is always allowed
        countdown.reset(5).unwrap();
        assert_eq!(countdown.remaining(), 5);
        assert!(countdown.is_running());
    }

    #[test]
    fn test_start_after_expiry() {
        let mut countdown = Countdown::new();
        countdown.start(1).unwrap();
        countdown.advance(1000);
        countdown.start(2).unwrap();
        assert_eq!(countdown.remaining(), 2);
    }

    #[test]
    fn test_empty_budget_rejected() {
        let mut countdown = Countdown::new();
        assert!(matches!(countdown.start(0), Err(Error::EmptyBudget)));
        assert!(matches!(countdown.reset(0), Err(Error::EmptyBudget)));
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_pause_holds_partial_second() {
        let mut countdown = Countdown::new();
        countdown.start(15).unwrap();
        countdown.advance(600);

        countdown.pause();
        assert_eq!(countdown.until_next_tick(), None);
        assert!(countdown.advance(5000).is_empty());
        assert_eq!(countdown.remaining(), 15);

        countdown.resume();
        assert_eq!(countdown.until_next_tick(), Some(400));
        assert_eq!(countdown.advance(400), vec![TimerEvent::Tick(14)]);
    }

    #[test]
    fn test_reset_drops_partial_second() {
        let mut countdown = Countdown::new();
        countdown.start(15).unwrap();
        countdown.advance(2700);
        assert_eq!(countdown.remaining(), 13);

        countdown.reset(15).unwrap();
        assert_eq!(countdown.remaining(), 15);
        assert_eq!(countdown.until_next_tick(), Some(1000));
    }

    #[test]
    fn test_stop_is_silent() {
        let mut countdown = Countdown::new();
        countdown.start(2).unwrap();
        countdown.stop();
        assert!(countdown.advance(5000).is_empty());
        assert!(!countdown.is_running());
        // Stopped countdowns can be started again
        countdown.start(2).unwrap();
    }
}
