//! Render-facing view of a session
//!
//! Renderers read a [`Snapshot`] and never touch the session. Visual flags are
//! derived from the phase so impossible combinations cannot be expressed.

use std::fmt;

use glam::Vec2;
use serde::Serialize;

use crate::catalog::{Catalog, Question};
use crate::consts::LANE_COUNT;
use crate::error::Result;
use crate::session::{self, Lane, Outcome, PhaseKind, Session};
use crate::settings::Settings;

/// Read-only session state plus per-frame visual flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub score: u32,
    pub level_index: usize,
    pub level_count: usize,
    pub phase: PhaseKind,
    pub selected_lane: Option<Lane>,
    pub player_lane: Lane,
    pub outcome: Option<Outcome>,
    pub time_remaining: u32,
    pub time_budget: u32,
    pub question: &'a Question,
    /// Avatar is in the air
    pub is_jumping: bool,
    /// Avatar is jumping onto the correct lane
    pub is_moving_forward: bool,
}

impl<'a> Snapshot<'a> {
    pub fn capture(session: &Session, catalog: &'a Catalog, settings: &Settings) -> Result<Self> {
        Ok(Self {
            score: session.score(),
            level_index: session.level_index(),
            level_count: catalog.len(),
            phase: session.phase().kind(),
            selected_lane: session.selected_lane(),
            player_lane: session.player_lane(),
            outcome: session.outcome(),
            time_remaining: session.time_remaining(),
            time_budget: settings.time_budget_secs,
            question: catalog.get(session.level_index())?,
            is_jumping: session::is_jumping(session),
            is_moving_forward: session::is_moving_forward(session, catalog)?,
        })
    }
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[level {}/{} | score {} | {:>2}s] ",
            self.level_index + 1,
            self.level_count,
            self.score,
            self.time_remaining
        )?;
        match (self.outcome, self.phase) {
            (Some(Outcome::Won), _) => write!(f, "You made it! Press r to play again"),
            (Some(Outcome::Lost), _) => write!(f, "Game over. Press r to restart"),
            (None, PhaseKind::Resolving) => write!(f, "Jumping..."),
            (None, PhaseKind::AdvancingLevel) => write!(f, "Correct! Moving on..."),
            (None, _) => {
                write!(f, "{}", self.question.prompt)?;
                for (i, option) in self.question.options.iter().enumerate() {
                    write!(f, "\n  {}) {}", i + 1, option.label)?;
                }
                Ok(())
            }
        }
    }
}

/// Canvas layout: three platforms along the bottom, avatar on top
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stage {
    pub size: Vec2,
    pub platform_size: Vec2,
    /// Distance from platform top to canvas bottom
    pub platform_drop: f32,
    pub player_size: f32,
    pub jump_height: f32,
    pub forward_shift: f32,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            size: Vec2::new(600.0, 200.0),
            platform_size: Vec2::new(120.0, 20.0),
            platform_drop: 60.0,
            player_size: 24.0,
            jump_height: 30.0,
            forward_shift: 50.0,
        }
    }
}

impl Stage {
    /// Gap between platforms (and at both edges)
    pub fn platform_gap(&self) -> f32 {
        let lanes = LANE_COUNT as f32;
        (self.size.x - lanes * self.platform_size.x) / (lanes + 1.0)
    }

    /// Top-left corner of the platform under `lane`
    pub fn platform_origin(&self, lane: Lane) -> Vec2 {
        let gap = self.platform_gap();
        Vec2::new(
            gap + lane.index() as f32 * (self.platform_size.x + gap),
            self.size.y - self.platform_drop,
        )
    }

    /// Top-left corner of the avatar for this frame
    pub fn player_origin(&self, snapshot: &Snapshot<'_>) -> Vec2 {
        let platform = self.platform_origin(snapshot.player_lane);
        let mut pos = Vec2::new(
            platform.x + (self.platform_size.x - self.player_size) / 2.0,
            platform.y - self.player_size,
        );
        if snapshot.is_moving_forward {
            pos.x += self.forward_shift;
        }
        if snapshot.is_jumping {
            pos.y -= self.jump_height;
        }
        pos
    }
}
