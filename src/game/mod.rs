//! This module contains the main game logic and state.
//!
//! A [`Session`] owns everything one running game needs: the current map, the
//! player, the ghosts, score bookkeeping, the phase state machine and the ranking
//! table. The frame loop drives it through [`Session::update`] and reads it back
//! through the accessors; the session never calls out to rendering or audio.

pub mod state;

use std::mem;
use std::path::{Path, PathBuf};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use crate::config::GameConfig;
use crate::constants::{score, HUD_MESSAGE_DURATION, PACMAN_START_LIVES, PACMAN_STEP_INTERVAL, POWER_MODE_DURATION};
use crate::entity::ghost::Ghost;
use crate::entity::pacman::Pacman;
use crate::error::{GameError, GameResult, RankingError};
use crate::events::{GameCommand, GameEvent, Input};
use crate::map::parser::Tile;
use crate::map::Map;
use crate::ranking::Ranking;
use crate::save::SaveGame;

use self::state::{HudMessage, Menu, MenuAction, Phase, ScoreEntry};

/// How a single step attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// No legal move; the entity stays put.
    Blocked,
    Moved,
    /// The step ended in a collision that hit the player.
    Hit,
}

/// The root of one running game.
pub struct Session {
    config: GameConfig,
    map: Map,
    map_path: PathBuf,
    pacman: Pacman,
    ghosts: Vec<Ghost>,
    score: u32,
    lives: u32,
    level: u32,
    pellets_remaining: u32,
    phase: Phase,
    paused: bool,
    menu: Menu,
    score_entry: Option<ScoreEntry>,
    ranking: Ranking,
    hud: Option<HudMessage>,
    events: Vec<GameEvent>,
    rng: SmallRng,
    running: bool,
}

impl Session {
    /// Creates a session on the title screen, reading the ranking table from disk.
    ///
    /// A missing or unreadable ranking file leaves the default table in place.
    pub fn new(config: GameConfig) -> Self {
        let ranking = match Ranking::load(&config.ranking_path) {
            Ok(ranking) => ranking,
            Err(RankingError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %config.ranking_path.display(), "No ranking file yet, starting empty");
                Ranking::default()
            }
            Err(err) => {
                warn!(path = %config.ranking_path.display(), error = %err, "Could not read ranking file");
                Ranking::default()
            }
        };
        Self::with_ranking(config, ranking)
    }

    /// Creates a session already playing `map` as level 1.
    ///
    /// Nothing is read from disk; the ranking table starts empty.
    pub fn from_map(config: GameConfig, map: Map) -> Self {
        let path = config.level_path(1);
        let mut session = Self::with_ranking(config, Ranking::default());
        session.score = 0;
        session.lives = PACMAN_START_LIVES;
        session.install_level(map, path, 1);
        session.set_phase(Phase::Playing);
        session
    }

    fn with_ranking(config: GameConfig, ranking: Ranking) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self {
            config,
            map: Map::default(),
            map_path: PathBuf::new(),
            pacman: Pacman::default(),
            ghosts: Vec::new(),
            score: 0,
            lives: PACMAN_START_LIVES,
            level: 0,
            pellets_remaining: 0,
            phase: Phase::Title,
            paused: false,
            menu: Menu::new(Menu::TITLE),
            score_entry: None,
            ranking,
            hud: None,
            events: Vec::new(),
            rng,
            running: true,
        }
    }

    /// Advances the session by `dt` seconds with the input sampled for this frame.
    pub fn update(&mut self, dt: f32, input: &Input) {
        if self.hud.as_mut().is_some_and(|hud| hud.tick(dt)) {
            self.hud = None;
        }

        for &command in &input.commands {
            if !self.running {
                return;
            }
            self.handle_command(command);
        }

        if self.phase != Phase::Playing || self.paused || !self.running {
            return;
        }

        if let Some(direction) = input.direction {
            self.pacman.pending_direction = Some(direction);
        }

        self.tick_power(dt);
        self.advance_pacman(dt);
        self.advance_ghosts(dt);

        if self.phase == Phase::Playing {
            self.check_collisions();
        }
        if self.phase == Phase::Playing && self.pellets_remaining == 0 {
            self.advance_level();
        }
    }

    fn handle_command(&mut self, command: GameCommand) {
        trace!(phase = ?self.phase, ?command, "Handling command");
        match (self.phase, command) {
            (Phase::Playing, GameCommand::ToggleMenu) => self.toggle_pause(),
            (Phase::Playing, _) if !self.paused => {}
            (Phase::Playing, GameCommand::Cancel) => self.toggle_pause(),

            (Phase::EnterScore, GameCommand::Text(c)) => {
                let max_len = self.config.effective_name_len();
                if let Some(entry) = self.score_entry.as_mut() {
                    entry.push(c, max_len);
                }
            }
            (Phase::EnterScore, GameCommand::Backspace) => {
                if let Some(entry) = self.score_entry.as_mut() {
                    entry.backspace();
                }
            }
            (Phase::EnterScore, GameCommand::Confirm) => self.commit_score(),
            (Phase::EnterScore, GameCommand::Cancel) => self.discard_score(),
            (Phase::EnterScore, _) => {}

            (Phase::Ranking, GameCommand::Confirm | GameCommand::Cancel | GameCommand::Action(MenuAction::Title)) => {
                self.set_phase(Phase::Title)
            }
            (Phase::Ranking, _) => {}

            (_, GameCommand::MenuUp) => self.menu.prev(),
            (_, GameCommand::MenuDown) => self.menu.next(),
            (_, GameCommand::Confirm) => {
                if let Some(action) = self.menu.selected_action() {
                    self.perform(action);
                }
            }
            (_, GameCommand::Action(action)) if self.menu.offers(action) => self.perform(action),
            _ => {}
        }
    }

    fn perform(&mut self, action: MenuAction) {
        debug!(phase = ?self.phase, ?action, "Menu action");
        match action {
            MenuAction::NewGame => self.new_game(),
            MenuAction::Load => {
                let path = self.config.save_path.clone();
                if let Err(err) = self.load_game_from(&path) {
                    warn!(path = %path.display(), error = %err, "Could not load game");
                    self.post_message("Could not load game");
                }
            }
            MenuAction::Save => {
                let path = self.config.save_path.clone();
                match self.save_game_to(&path) {
                    Ok(()) => self.post_message("Game saved"),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "Could not save game");
                        self.post_message("Could not save game");
                    }
                }
            }
            MenuAction::Resume => self.paused = false,
            MenuAction::Quit => {
                info!("Quit requested");
                self.running = false;
            }
            MenuAction::Ranking => self.set_phase(Phase::Ranking),
            MenuAction::Title => self.set_phase(Phase::Title),
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.menu = Menu::new(Menu::PAUSE);
        }
        debug!(paused = self.paused, "Pause menu toggled");
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(old_state = ?self.phase, new_state = ?phase, "Phase changed");
        }
        self.phase = phase;
        self.paused = false;
        self.menu = Menu::new(match phase {
            Phase::Title => Menu::TITLE,
            Phase::Playing => Menu::PAUSE,
            Phase::Victory | Phase::GameOver => Menu::END,
            Phase::Ranking => Menu::RANKING,
            Phase::EnterScore => &[],
        });
    }

    fn post_message(&mut self, text: impl Into<String>) {
        self.hud = Some(HudMessage::new(text, HUD_MESSAGE_DURATION));
    }

    /// Starts over from level 1 with a fresh score and lives.
    ///
    /// Nothing changes unless level 1 loads.
    pub fn new_game(&mut self) {
        let path = self.config.level_path(1);
        match Map::load(&path) {
            Ok(map) => {
                info!(path = %path.display(), "Starting new game");
                self.score = 0;
                self.lives = PACMAN_START_LIVES;
                self.score_entry = None;
                self.install_level(map, path, 1);
                self.set_phase(Phase::Playing);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Could not start new game");
                self.post_message("Could not load level 1");
            }
        }
    }

    /// Replaces the map and every entity, keeping score and lives.
    fn install_level(&mut self, map: Map, path: PathBuf, level: u32) {
        self.pacman = Pacman::new(map.pacman_start());
        self.ghosts = map.ghost_starts().iter().copied().map(Ghost::new).collect();
        self.pellets_remaining = map.pellets_remaining();
        self.map = map;
        self.map_path = path;
        self.level = level;
        self.events.push(GameEvent::LevelStarted { level });
    }

    fn advance_level(&mut self) {
        let cleared = self.level;
        self.events.push(GameEvent::LevelCleared { level: cleared });
        let next = cleared + 1;
        let path = self.config.level_path(next);
        match Map::load(&path) {
            Ok(map) => {
                info!(level = next, path = %path.display(), "Advancing to next level");
                self.install_level(map, path, next);
            }
            Err(err) => {
                if err.is_not_found() {
                    info!(level = cleared, "No further levels, game won");
                } else {
                    warn!(level = next, error = %err, "Could not load next level, ending game");
                }
                self.end_session(Phase::Victory);
            }
        }
    }

    /// Moves to the end screen, detouring through name entry when the score ranks.
    fn end_session(&mut self, outcome: Phase) {
        self.events.push(match outcome {
            Phase::Victory => GameEvent::Victory,
            _ => GameEvent::GameOver,
        });
        info!(outcome = outcome.as_ref(), score = self.score, level = self.level, "Game ended");
        match self.ranking.position_for_score(self.score) {
            Some(index) => {
                self.score_entry = Some(ScoreEntry::new(index, self.score, outcome));
                self.set_phase(Phase::EnterScore);
            }
            None => self.set_phase(outcome),
        }
    }

    fn commit_score(&mut self) {
        let Some(entry) = self.score_entry.take() else {
            self.set_phase(Phase::Title);
            return;
        };
        let name = entry.final_name().to_string();
        self.ranking.insert(entry.index, &name, entry.score);
        self.events.push(GameEvent::RankingEntered { index: entry.index });
        info!(index = entry.index, name = %name, score = entry.score, "Ranking entry added");

        if let Err(err) = self.ranking.save(&self.config.ranking_path) {
            warn!(path = %self.config.ranking_path.display(), error = %err, "Could not write ranking file");
            self.post_message("Could not save ranking");
        }
        self.set_phase(entry.then);
    }

    fn discard_score(&mut self) {
        let then = self.score_entry.take().map_or(Phase::Title, |entry| entry.then);
        debug!("Ranking entry discarded");
        self.set_phase(then);
    }

    fn tick_power(&mut self, dt: f32) {
        if self.pacman.tick_power(dt) {
            debug!("Power mode ended");
        }
        for ghost in &mut self.ghosts {
            ghost.tick_vulnerability(dt);
        }
    }

    fn activate_power(&mut self) {
        self.pacman.activate_power(POWER_MODE_DURATION);
        for ghost in &mut self.ghosts {
            ghost.make_vulnerable(POWER_MODE_DURATION);
        }
        debug!(duration = POWER_MODE_DURATION, ghosts = self.ghosts.len(), "Power mode activated");
    }

    fn advance_pacman(&mut self, dt: f32) {
        self.pacman.move_timer += dt;
        while self.pacman.move_timer >= PACMAN_STEP_INTERVAL {
            match self.step_pacman() {
                Step::Moved => self.pacman.move_timer -= PACMAN_STEP_INTERVAL,
                Step::Blocked => {
                    // Keep at most one step banked so a newly opened turn fires at once.
                    self.pacman.move_timer = self.pacman.move_timer.min(PACMAN_STEP_INTERVAL);
                    break;
                }
                Step::Hit => break,
            }
        }
    }

    fn step_pacman(&mut self) -> Step {
        let from = self.pacman.position;
        let pending = self.pacman.pending_direction;
        if pending.is_some() && self.map.is_legal_move(from, pending) {
            self.pacman.direction = pending;
        }
        if !self.map.is_legal_move(from, self.pacman.direction) {
            self.pacman.direction = None;
            return Step::Blocked;
        }

        let mut to = from.step(self.pacman.direction);
        if let Some(exit) = self.map.portal_exit(to) {
            trace!(from = ?to, to = ?exit, "Pac-Man teleported");
            to = exit;
            self.events.push(GameEvent::Teleported);
        }
        self.pacman.position = to;
        trace!(?from, ?to, direction = ?self.pacman.direction, "Pac-Man stepped");

        match self.map.consume_pellet(to) {
            Some(Tile::PowerPellet) => {
                self.pellets_remaining = self.pellets_remaining.saturating_sub(1);
                self.score = self.score.saturating_add(score::POWER_PELLET);
                self.events.push(GameEvent::PowerPelletEaten);
                self.activate_power();
            }
            Some(_) => {
                self.pellets_remaining = self.pellets_remaining.saturating_sub(1);
                self.score = self.score.saturating_add(score::PELLET);
                self.events.push(GameEvent::PelletEaten);
                trace!(pellets_remaining = self.pellets_remaining, "Pellet consumed");
            }
            None => {}
        }

        if self.check_collisions() {
            Step::Hit
        } else {
            Step::Moved
        }
    }

    fn advance_ghosts(&mut self, dt: f32) {
        for index in 0..self.ghosts.len() {
            if self.phase != Phase::Playing {
                return;
            }
            if !self.ghosts[index].alive {
                continue;
            }
            self.ghosts[index].move_timer += dt;
            loop {
                let ghost = &mut self.ghosts[index];
                let interval = ghost.step_interval();
                if !ghost.alive || ghost.move_timer < interval {
                    break;
                }
                ghost.move_timer -= interval;
                match self.step_ghost(index) {
                    Step::Moved => {}
                    Step::Blocked | Step::Hit => break,
                }
            }
        }
    }

    fn step_ghost(&mut self, index: usize) -> Step {
        let ghost = &self.ghosts[index];
        let Some(direction) = ghost.choose_direction(
            &self.map,
            self.pacman.position,
            self.pacman.powered,
            self.config.ghost_ai,
            &mut self.rng,
        ) else {
            trace!(ghost = index, position = ?ghost.position, "Ghost boxed in");
            return Step::Blocked;
        };

        let ghost = &mut self.ghosts[index];
        let from = ghost.position;
        ghost.direction = Some(direction);
        ghost.position = from.step(Some(direction));
        if let Some(exit) = self.map.portal_exit(ghost.position) {
            ghost.position = exit;
        }
        trace!(ghost = index, ?from, to = ?ghost.position, ?direction, "Ghost stepped");

        if self.check_collisions() {
            Step::Hit
        } else {
            Step::Moved
        }
    }

    /// Resolves contact between the player and the first living ghost on its tile.
    ///
    /// Returns `true` when the player was hit.
    fn check_collisions(&mut self) -> bool {
        let player = self.pacman.position;
        let Some(index) = self
            .ghosts
            .iter()
            .position(|ghost| ghost.alive && ghost.position == player)
        else {
            return false;
        };

        if self.pacman.powered && self.ghosts[index].vulnerable {
            self.ghosts[index].kill();
            self.score = self.score.saturating_add(score::GHOST);
            self.events.push(GameEvent::GhostEaten { index });
            debug!(ghost = index, score = self.score, "Ghost eaten");
            false
        } else {
            self.hit_player();
            true
        }
    }

    fn hit_player(&mut self) {
        self.score = self.score.saturating_sub(score::HIT_PENALTY);
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::PlayerHit { lives_left: self.lives });
        debug!(lives = self.lives, score = self.score, "Pac-Man hit");

        if self.lives == 0 {
            self.pacman.direction = None;
            self.pacman.pending_direction = None;
            self.end_session(Phase::GameOver);
            return;
        }

        self.pacman.respawn(self.map.pacman_start());
        for (ghost, &start) in self.ghosts.iter_mut().zip(self.map.ghost_starts()) {
            if ghost.alive {
                ghost.respawn(start);
            }
        }
    }

    /// Writes the current game to `path`.
    pub fn save_game_to(&mut self, path: &Path) -> GameResult<()> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidState(format!(
                "cannot save while in {}",
                self.phase.as_ref()
            )));
        }
        self.to_save().write_to(path)?;
        info!(path = %path.display(), level = self.level, score = self.score, "Game saved");
        self.events.push(GameEvent::GameSaved);
        Ok(())
    }

    /// Replaces the session state with the game stored at `path`.
    ///
    /// The file is decoded and validated in full before anything changes, so a failed
    /// load leaves the session exactly as it was.
    pub fn load_game_from(&mut self, path: &Path) -> GameResult<()> {
        let save = SaveGame::read_from(path)?;
        info!(path = %path.display(), level = save.level, score = save.score, "Game loaded");
        self.apply_save(save);
        self.post_message("Game loaded");
        Ok(())
    }

    fn to_save(&self) -> SaveGame {
        SaveGame {
            level: self.level,
            score: self.score,
            lives: self.lives,
            pellets_remaining: self.pellets_remaining,
            map_path: self.map_path.clone(),
            map: self.map.clone(),
            pacman: self.pacman.clone(),
            ghosts: self.ghosts.clone(),
        }
    }

    fn apply_save(&mut self, save: SaveGame) {
        self.level = save.level;
        self.score = save.score;
        self.lives = save.lives;
        self.pellets_remaining = save.map.pellets_remaining();
        self.map = save.map;
        self.map_path = save.map_path;
        self.pacman = save.pacman;
        self.ghosts = save.ghosts;
        self.score_entry = None;
        self.events.push(GameEvent::GameLoaded);
        self.set_phase(Phase::Playing);
    }

    /// Takes every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// The level file the current map was loaded from.
    pub fn map_path(&self) -> &Path {
        &self.map_path
    }

    pub fn pacman(&self) -> &Pacman {
        &self.pacman
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn pellets_remaining(&self) -> u32 {
        self.pellets_remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The menu currently on screen, if any.
    pub fn menu(&self) -> Option<&Menu> {
        match self.phase {
            Phase::Playing if !self.paused => None,
            Phase::EnterScore => None,
            _ => Some(&self.menu),
        }
    }

    pub fn score_entry(&self) -> Option<&ScoreEntry> {
        self.score_entry.as_ref()
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    pub fn hud_message(&self) -> Option<&HudMessage> {
        self.hud.as_ref()
    }

    /// `false` once the player has asked to quit.
    pub fn is_running(&self) -> bool {
        self.running
    }
}
