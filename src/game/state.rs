//! Phase, menu and sub-state records owned by the session.

use strum_macros::{AsRefStr, IntoStaticStr};

use crate::constants::ranking::DEFAULT_NAME;

/// The top-level mode of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, IntoStaticStr)]
pub enum Phase {
    #[default]
    Title,
    Playing,
    Victory,
    GameOver,
    Ranking,
    /// Typing a name for a score that made the ranking.
    EnterScore,
}

/// Something a menu item (or its shortcut key) does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum MenuAction {
    NewGame,
    Load,
    Save,
    Resume,
    Quit,
    Ranking,
    Title,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::NewGame => "New game",
            MenuAction::Load => "Load game",
            MenuAction::Save => "Save game",
            MenuAction::Resume => "Resume",
            MenuAction::Quit => "Quit",
            MenuAction::Ranking => "Ranking",
            MenuAction::Title => "Title screen",
        }
    }
}

/// A vertical list of actions with a clamped cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    items: &'static [MenuAction],
    selected: usize,
}

impl Menu {
    pub const TITLE: &'static [MenuAction] = &[MenuAction::NewGame, MenuAction::Load, MenuAction::Ranking, MenuAction::Quit];
    pub const PAUSE: &'static [MenuAction] = &[
        MenuAction::NewGame,
        MenuAction::Load,
        MenuAction::Save,
        MenuAction::Quit,
        MenuAction::Resume,
    ];
    pub const END: &'static [MenuAction] = &[MenuAction::NewGame, MenuAction::Ranking, MenuAction::Title, MenuAction::Quit];
    pub const RANKING: &'static [MenuAction] = &[MenuAction::Title];

    pub fn new(items: &'static [MenuAction]) -> Self {
        Self { items, selected: 0 }
    }

    pub fn items(&self) -> &'static [MenuAction] {
        self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_action(&self) -> Option<MenuAction> {
        self.items.get(self.selected).copied()
    }

    pub fn offers(&self, action: MenuAction) -> bool {
        self.items.contains(&action)
    }

    pub fn next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Name entry for a score that made the ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    /// Slot the score will be inserted at.
    pub index: usize,
    pub score: u32,
    pub name: String,
    /// Screen shown once the entry is committed or cancelled.
    pub then: Phase,
}

impl ScoreEntry {
    pub fn new(index: usize, score: u32, then: Phase) -> Self {
        Self {
            index,
            score,
            name: String::new(),
            then,
        }
    }

    /// Appends a printable ASCII character while the name is shorter than `max_len`.
    pub fn push(&mut self, c: char, max_len: usize) -> bool {
        if !(c.is_ascii_graphic() || c == ' ') || self.name.len() >= max_len {
            return false;
        }
        self.name.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }

    /// The name to store: the typed one, or the default for an empty entry.
    pub fn final_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            DEFAULT_NAME
        } else {
            trimmed
        }
    }
}

/// A transient message shown on the HUD.
#[derive(Debug, Clone, PartialEq)]
pub struct HudMessage {
    pub text: String,
    /// Seconds left on screen.
    pub remaining: f32,
}

impl HudMessage {
    pub fn new(text: impl Into<String>, duration: f32) -> Self {
        Self {
            text: text.into(),
            remaining: duration,
        }
    }

    /// Returns `true` once the message has expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}
