//! This module contains all the constants used in the game.

use std::time::Duration;

/// The fixed frame time the terminal front-end simulates per frame.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Number of rows read from a level file.
pub const MAP_ROWS: usize = 20;
/// Number of columns read from a level file.
pub const MAP_COLS: usize = 40;

/// Seconds between two player steps.
pub const PACMAN_STEP_INTERVAL: f32 = 0.15;
/// Seconds between two ghost steps.
pub const GHOST_STEP_INTERVAL: f32 = 0.20;
/// Seconds between two ghost steps while the ghost is vulnerable.
pub const GHOST_STEP_INTERVAL_VULNERABLE: f32 = 0.35;
/// How long a power pellet keeps the player powered (and the ghosts vulnerable), in seconds.
pub const POWER_MODE_DURATION: f32 = 8.0;

/// Lives at the start of a new game.
pub const PACMAN_START_LIVES: u32 = 3;

pub mod score {
    /// Points for a regular pellet.
    pub const PELLET: u32 = 10;
    /// Points for a power pellet.
    pub const POWER_PELLET: u32 = 50;
    /// Points for eating a vulnerable ghost.
    pub const GHOST: u32 = 100;
    /// Points lost when a ghost catches the player.
    pub const HIT_PENALTY: u32 = 200;
}

pub mod ranking {
    /// Number of entries kept in the ranking table.
    pub const MAX_ENTRIES: usize = 10;
    /// Size of the on-disk name buffer, terminator included.
    pub const NAME_LEN: usize = 16;
    /// Name stored when the player commits an empty name.
    pub const DEFAULT_NAME: &str = "PLAYER";
    /// Name shown in unused slots.
    pub const EMPTY_NAME: &str = "---";
}

/// How long a HUD message stays on screen, in seconds.
pub const HUD_MESSAGE_DURATION: f32 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_vulnerable_ghosts_are_slower() {
        assert!(GHOST_STEP_INTERVAL_VULNERABLE > GHOST_STEP_INTERVAL);
    }

    #[test]
    fn test_ranking_name_fits_buffer() {
        assert!(ranking::DEFAULT_NAME.len() < ranking::NAME_LEN);
        assert!(ranking::EMPTY_NAME.len() < ranking::NAME_LEN);
    }
}
