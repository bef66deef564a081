//! Key bindings for the terminal front-end.
//!
//! The session only understands [`Input`]; this module turns raw key presses into
//! one, using a different keymap depending on which screen is showing.

use std::collections::HashMap;

use tracing::trace;

use crate::events::{GameCommand, Input};
use crate::game::state::{MenuAction, Phase};
use crate::map::direction::Direction;

/// A key press as read from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Splits one line of terminal input into key presses.
    ///
    /// A line that is exactly a key name (`enter`, `esc`, `tab`, `bs`, `up`, `down`,
    /// `left`, `right`) is that key; anything else is one press per character.
    pub fn parse_line(line: &str) -> Vec<Key> {
        let line = line.trim_end_matches(['\r', '\n']);
        let named = match line.trim().to_ascii_lowercase().as_str() {
            "enter" => Some(Key::Enter),
            "esc" | "escape" => Some(Key::Escape),
            "tab" => Some(Key::Tab),
            "bs" | "backspace" => Some(Key::Backspace),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            _ => None,
        };
        match named {
            Some(key) => vec![key],
            None => line
                .chars()
                .map(|c| match c {
                    '\t' => Key::Tab,
                    '\u{1b}' => Key::Escape,
                    '\u{8}' | '\u{7f}' => Key::Backspace,
                    c => Key::Char(c),
                })
                .collect(),
        }
    }
}

/// What a key does while the maze is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayBinding {
    Move(Direction),
    Command(GameCommand),
}

#[derive(Debug, Clone)]
pub struct Bindings {
    play: HashMap<Key, PlayBinding>,
    menu: HashMap<Key, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut play = HashMap::new();

        // Player movement
        for (keys, direction) in [
            ([Key::Char('w'), Key::Up], Direction::Up),
            ([Key::Char('s'), Key::Down], Direction::Down),
            ([Key::Char('a'), Key::Left], Direction::Left),
            ([Key::Char('d'), Key::Right], Direction::Right),
        ] {
            for key in keys {
                play.insert(key, PlayBinding::Move(direction));
            }
        }
        play.insert(Key::Tab, PlayBinding::Command(GameCommand::ToggleMenu));
        play.insert(Key::Char('m'), PlayBinding::Command(GameCommand::ToggleMenu));
        play.insert(Key::Escape, PlayBinding::Command(GameCommand::ToggleMenu));

        let mut menu = HashMap::new();

        // Navigation
        menu.insert(Key::Char('k'), GameCommand::MenuUp);
        menu.insert(Key::Up, GameCommand::MenuUp);
        menu.insert(Key::Char('j'), GameCommand::MenuDown);
        menu.insert(Key::Down, GameCommand::MenuDown);
        menu.insert(Key::Enter, GameCommand::Confirm);
        menu.insert(Key::Escape, GameCommand::Cancel);
        menu.insert(Key::Tab, GameCommand::ToggleMenu);
        menu.insert(Key::Char('m'), GameCommand::ToggleMenu);

        // Shortcuts
        for (c, action) in [
            ('n', MenuAction::NewGame),
            ('c', MenuAction::Load),
            ('s', MenuAction::Save),
            ('q', MenuAction::Quit),
            ('v', MenuAction::Resume),
            ('r', MenuAction::Ranking),
            ('t', MenuAction::Title),
        ] {
            menu.insert(Key::Char(c), GameCommand::Action(action));
        }

        Self { play, menu }
    }
}

impl Bindings {
    /// Builds the frame's input from the keys pressed, for the given screen.
    ///
    /// When several movement keys are pressed, the last one wins.
    pub fn sample(&self, phase: Phase, paused: bool, keys: &[Key]) -> Input {
        let mut input = Input::idle();
        for &key in keys {
            match phase {
                Phase::EnterScore => {
                    let command = match key {
                        Key::Char(c) => Some(GameCommand::Text(c)),
                        Key::Backspace => Some(GameCommand::Backspace),
                        Key::Enter => Some(GameCommand::Confirm),
                        Key::Escape => Some(GameCommand::Cancel),
                        _ => None,
                    };
                    input.commands.extend(command);
                }
                Phase::Playing if !paused => match self.play.get(&key) {
                    Some(PlayBinding::Move(direction)) => input.direction = Some(*direction),
                    Some(PlayBinding::Command(command)) => input.commands.push(*command),
                    None => {}
                },
                _ => input.commands.extend(self.menu.get(&key).copied()),
            }
        }
        trace!(?phase, paused, ?keys, ?input, "Sampled input");
        input
    }
}
