//! Runtime configuration.
//!
//! Game rules are compile-time constants; only file locations and a few player-facing
//! knobs are configurable. Values come from `PACMAN_*` environment variables, with a
//! default for every field.

use std::path::PathBuf;

use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::constants::ranking::NAME_LEN;
use crate::entity::ghost::GhostAi;
use crate::error::ConfigError;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "PACMAN_";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding the level files.
    pub maps_dir: PathBuf,
    /// Level `n` is read from `<maps_dir>/<level_file_prefix><n>.txt`.
    pub level_file_prefix: String,
    pub save_path: PathBuf,
    pub ranking_path: PathBuf,
    /// Longest name accepted on the score-entry screen.
    pub name_max_len: usize,
    pub ghost_ai: GhostAi,
    /// Seed for ghost tie-breaking and wandering; random when unset.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maps_dir: PathBuf::from("assets/maps"),
            level_file_prefix: "mapa".to_string(),
            save_path: PathBuf::from("savegame.sav"),
            ranking_path: PathBuf::from("ranking.dat"),
            name_max_len: NAME_LEN - 1,
            ghost_ai: GhostAi::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Path of the level file for `level` (1-based).
    pub fn level_path(&self, level: u32) -> PathBuf {
        self.maps_dir.join(format!("{}{level}.txt", self.level_file_prefix))
    }

    /// Name length actually enforced: at least one character, and never more than the
    /// ranking record can hold.
    pub fn effective_name_len(&self) -> usize {
        self.name_max_len.clamp(1, NAME_LEN - 1)
    }
}

/// Reads the configuration from `PACMAN_*` environment variables.
pub fn load_config() -> Result<GameConfig, ConfigError> {
    Ok(Figment::new().merge(Env::prefixed(ENV_PREFIX)).extract()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_path() {
        let config = GameConfig::default();
        assert_eq!(config.level_path(3), PathBuf::from("assets/maps/mapa3.txt"));
    }

    #[test]
    fn test_effective_name_len_is_clamped() {
        let mut config = GameConfig {
            name_max_len: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.effective_name_len(), 1);
        config.name_max_len = 200;
        assert_eq!(config.effective_name_len(), NAME_LEN - 1);
    }

    #[test]
    fn test_load_config_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PACMAN_MAPS_DIR", "levels");
            jail.set_env("PACMAN_GHOST_AI", "wander");
            jail.set_env("PACMAN_SEED", "42");

            let config = load_config().expect("config should load");
            assert_eq!(config.maps_dir, PathBuf::from("levels"));
            assert_eq!(config.ghost_ai, GhostAi::Wander);
            assert_eq!(config.seed, Some(42));
            assert_eq!(config.save_path, GameConfig::default().save_path);
            Ok(())
        });
    }
}
