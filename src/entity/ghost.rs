//! Ghost entity implementation.
//!
//! Ghosts move one tile per step through the grid. At every step they pick a
//! direction with [`Ghost::choose_direction`]: keep going through corridors, never
//! double back at a junction unless forced to, and otherwise move greedily towards
//! (or away from, while Pac-Man is powered) the player.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, EnumString};

use crate::constants::{GHOST_STEP_INTERVAL, GHOST_STEP_INTERVAL_VULNERABLE};
use crate::entity::countdown;
use crate::map::direction::{Direction, GridPosition};
use crate::map::Map;

/// How ghosts pick among the directions left after corridor and reversal filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GhostAi {
    /// Chase the player by Manhattan distance, or flee while the player is powered.
    #[default]
    Pursuit,
    /// Pick uniformly at random.
    Wander,
}

/// A ghost agent.
///
/// Dead ghosts stay in the collection with `alive == false` until the level ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub position: GridPosition,
    pub direction: Option<Direction>,
    pub vulnerable: bool,
    pub vulnerable_time_left: f32,
    pub alive: bool,
    /// Accumulated time towards the next step.
    pub move_timer: f32,
}

impl Ghost {
    pub fn new(start: GridPosition) -> Self {
        Self {
            position: start,
            direction: None,
            vulnerable: false,
            vulnerable_time_left: 0.0,
            alive: true,
            move_timer: 0.0,
        }
    }

    /// Puts a living ghost back on `start` with no movement, vulnerability or step progress.
    pub fn respawn(&mut self, start: GridPosition) {
        self.position = start;
        self.direction = None;
        self.vulnerable = false;
        self.vulnerable_time_left = 0.0;
        self.move_timer = 0.0;
    }

    pub fn make_vulnerable(&mut self, duration: f32) {
        self.vulnerable = true;
        self.vulnerable_time_left = duration;
    }

    /// Returns `true` on the frame vulnerability runs out.
    pub fn tick_vulnerability(&mut self, dt: f32) -> bool {
        countdown(&mut self.vulnerable, &mut self.vulnerable_time_left, dt)
    }

    pub fn kill(&mut self) {
        self.alive = false;
        self.vulnerable = false;
        self.vulnerable_time_left = 0.0;
    }

    /// Vulnerable ghosts step less often.
    pub fn step_interval(&self) -> f32 {
        if self.vulnerable {
            GHOST_STEP_INTERVAL_VULNERABLE
        } else {
            GHOST_STEP_INTERVAL
        }
    }

    /// Picks the direction for the next step, or `None` when boxed in.
    ///
    /// `target` is the player's tile; `fleeing` flips the pursuit into an escape.
    pub fn choose_direction<R: Rng + ?Sized>(
        &self,
        map: &Map,
        target: GridPosition,
        fleeing: bool,
        ai: GhostAi,
        rng: &mut R,
    ) -> Option<Direction> {
        let options: SmallVec<[Direction; 4]> = Direction::DIRECTIONS
            .into_iter()
            .filter(|&dir| map.is_legal_move(self.position, Some(dir)))
            .collect();

        if options.is_empty() {
            return None;
        }

        // Corridors and dead ends: keep going straight.
        if let Some(current) = self.direction {
            if options.len() <= 2 && options.contains(&current) {
                return Some(current);
            }
        }

        let reverse = self.direction.map(Direction::opposite);
        let mut candidates: SmallVec<[Direction; 4]> = options
            .iter()
            .copied()
            .filter(|&dir| options.len() <= 1 || Some(dir) != reverse)
            .collect();
        if candidates.is_empty() {
            candidates = options;
        }

        match ai {
            GhostAi::Pursuit => self
                .best_candidate(&candidates, target, fleeing)
                .or_else(|| candidates.choose(rng).copied()),
            GhostAi::Wander => candidates.choose(rng).copied(),
        }
    }

    /// Closest (or, fleeing, farthest) candidate by Manhattan distance; ties keep the first.
    fn best_candidate(&self, candidates: &[Direction], target: GridPosition, fleeing: bool) -> Option<Direction> {
        let mut best: Option<(Direction, u32)> = None;
        for &dir in candidates {
            let distance = self.position.step(Some(dir)).manhattan(target);
            let better = match best {
                None => true,
                Some((_, best_distance)) if fleeing => distance > best_distance,
                Some((_, best_distance)) => distance < best_distance,
            };
            if better {
                best = Some((dir, distance));
            }
        }
        best.map(|(dir, _)| dir)
    }
}
