//! Pac-Man entity implementation.
//!
//! Pac-Man moves one tile per step. A direction typed ahead of time is kept as the
//! *pending* direction and replaces the current one as soon as that turn is open,
//! so the player can queue a turn before reaching the junction.

use crate::entity::countdown;
use crate::map::direction::{Direction, GridPosition};

/// The player-controlled agent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pacman {
    pub position: GridPosition,
    pub direction: Option<Direction>,
    /// Buffered next turn.
    pub pending_direction: Option<Direction>,
    pub powered: bool,
    pub power_time_left: f32,
    /// Accumulated time towards the next step.
    pub move_timer: f32,
}

impl Pacman {
    pub fn new(start: GridPosition) -> Self {
        Self {
            position: start,
            ..Self::default()
        }
    }

    /// Puts Pac-Man back on `start` with no movement, power or step progress.
    pub fn respawn(&mut self, start: GridPosition) {
        *self = Self::new(start);
    }

    pub fn activate_power(&mut self, duration: f32) {
        self.powered = true;
        self.power_time_left = duration;
    }

    /// Returns `true` on the frame power mode runs out.
    pub fn tick_power(&mut self, dt: f32) -> bool {
        countdown(&mut self.powered, &mut self.power_time_left, dt)
    }
}
