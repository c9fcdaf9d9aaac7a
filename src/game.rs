//! Single-threaded game driver
//!
//! Owns the catalog, the session, the countdown and the delayed-event queue,
//! and advances them together on a logical millisecond clock. Every mutation
//! funnels through [`session::apply`] one event at a time.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::input;
use crate::scheduler::Scheduler;
use crate::session::{self, Effect, Event, Generation, Session, Transition};
use crate::settings::Settings;
use crate::timer::{Countdown, TimerEvent};
use crate::view::Snapshot;

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    catalog: Catalog,
    settings: Settings,
    session: Session,
    countdown: Countdown,
    /// Session generation the countdown was last (re)started for
    countdown_generation: Generation,
    scheduler: Scheduler,
    clock_ms: u64,
}

impl Game {
    /// Start a fresh session with the clock running
    pub fn new(catalog: Catalog, settings: Settings) -> Result<Self> {
        settings.validate()?;
        let session = Session::new(Generation::FIRST, settings.time_budget_secs);
        let mut countdown = Countdown::new();
        countdown.start(settings.time_budget_secs)?;
        log::info!(
            "New game: {} levels, {}s per level",
            catalog.len(),
            settings.time_budget_secs
        );

        Ok(Self {
            catalog,
            settings,
            session,
            countdown,
            countdown_generation: Generation::FIRST,
            scheduler: Scheduler::new(),
            clock_ms: 0,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Milliseconds of game time elapsed since creation
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Delayed events still queued (including stale ones)
    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Result<Snapshot<'_>> {
        Snapshot::capture(&self.session, &self.catalog, &self.settings)
    }

    /// Route a raw key; unknown keys are ignored
    pub fn press(&mut self, key: &str) -> Result<Option<Transition>> {
        match input::route(key) {
            Some(event) => self.dispatch(event).map(Some),
            None => {
                log::debug!("Ignoring key {key:?}");
                Ok(None)
            }
        }
    }

    /// Apply one event and run its effects
    pub fn dispatch(&mut self, event: Event) -> Result<Transition> {
        let transition = session::apply(&mut self.session, &self.catalog, &self.settings, event)?;
        for effect in transition.effects() {
            self.run_effect(*effect)?;
        }
        Ok(transition)
    }

    /// Advance game time by `dt_ms`
    ///
    /// Countdown ticks and delayed events fire in time order. At the same
    /// instant, countdown ticks go first.
    pub fn advance(&mut self, dt_ms: u64) -> Result<()> {
        let target = self.clock_ms + dt_ms;

        loop {
            let next_tick = self.countdown.until_next_tick().map(|d| self.clock_ms + d);
            let next_due = match (next_tick, self.scheduler.next_due()) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };

            let Some(due) = next_due.filter(|&due| due <= target) else {
                let timer_events = self.countdown.advance(target - self.clock_ms);
                self.clock_ms = target;
                self.deliver_timer_events(timer_events)?;
                return Ok(());
            };

            let timer_events = self.countdown.advance(due - self.clock_ms);
            self.clock_ms = due;
            self.deliver_timer_events(timer_events)?;

            while let Some(event) = self.scheduler.pop_due(self.clock_ms) {
                self.dispatch(event)?;
            }
        }
    }

    fn deliver_timer_events(&mut self, events: Vec<TimerEvent>) -> Result<()> {
        let generation = self.countdown_generation;
        for event in events {
            let event = match event {
                TimerEvent::Tick(remaining) => Event::Tick {
                    generation,
                    remaining,
                },
                TimerEvent::Expired => Event::TimerExpired(generation),
            };
            self.dispatch(event)?;
        }
        Ok(())
    }

    fn run_effect(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::Schedule { delay_ms, event } => {
                self.scheduler.schedule(self.clock_ms + delay_ms, event);
            }
            Effect::PauseTimer => self.countdown.pause(),
            Effect::ResetTimer { budget_secs } => {
                self.countdown.reset(budget_secs)?;
                self.countdown_generation = self.session.generation();
            }
            Effect::StopTimer => self.countdown.stop(),
            Effect::Finished(outcome) => {
                log::info!(
                    "Finished {:?}: {} of {} correct",
                    outcome,
                    self.session.score(),
                    self.catalog.len()
                );
            }
        }
        Ok(())
    }
}
