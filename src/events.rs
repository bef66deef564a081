//! The command surface into the session and the event surface out of it.

use smallvec::SmallVec;

use crate::game::state::MenuAction;
use crate::map::direction::Direction;

/// A discrete, edge-triggered command sampled by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// Open or close the pause menu while playing.
    ToggleMenu,
    MenuUp,
    MenuDown,
    /// Activate the highlighted menu item, or commit a typed name.
    Confirm,
    /// Back out of the current screen, or discard a typed name.
    Cancel,
    Backspace,
    /// A printable character typed on the name-entry screen.
    Text(char),
    /// A shortcut key bound directly to a menu action.
    Action(MenuAction),
}

/// Everything the input collaborator sampled for one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Input {
    /// Held movement key, if any.
    pub direction: Option<Direction>,
    pub commands: SmallVec<[GameCommand; 4]>,
}

impl Input {
    /// A frame with no keys pressed.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn direction(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    pub fn command(command: GameCommand) -> Self {
        Self {
            direction: None,
            commands: SmallVec::from_slice(&[command]),
        }
    }

    pub fn with_command(mut self, command: GameCommand) -> Self {
        self.commands.push(command);
        self
    }
}

impl From<GameCommand> for Input {
    fn from(command: GameCommand) -> Self {
        Input::command(command)
    }
}

/// Notable things that happened during an update, for audio and effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PelletEaten,
    PowerPelletEaten,
    GhostEaten { index: usize },
    PlayerHit { lives_left: u32 },
    Teleported,
    LevelStarted { level: u32 },
    LevelCleared { level: u32 },
    Victory,
    GameOver,
    RankingEntered { index: usize },
    GameSaved,
    GameLoaded,
}
