//! Plain-text view of a [`Session`], for terminals and logs.

use std::fmt::Write;

use thousands::Separable;

use crate::game::state::{Menu, Phase};
use crate::game::Session;
use crate::map::direction::GridPosition;
use crate::map::parser::Tile;

const PACMAN_GLYPH: char = 'C';
const GHOST_GLYPH: char = 'G';
const VULNERABLE_GHOST_GLYPH: char = 'g';

/// Renders whatever screen the session is on.
pub fn render(session: &Session) -> String {
    let mut out = String::new();
    match session.phase() {
        Phase::Title => {
            out.push_str("PAC-MAN\n\n");
            push_menu(&mut out, session.menu());
        }
        Phase::Playing => {
            push_hud(&mut out, session);
            push_board(&mut out, session);
            if session.is_paused() {
                out.push_str("\n-- PAUSED --\n");
                push_menu(&mut out, session.menu());
            }
        }
        Phase::Victory | Phase::GameOver => {
            let title = if session.phase() == Phase::Victory {
                "VICTORY!"
            } else {
                "GAME OVER"
            };
            let _ = writeln!(out, "{title}\n\nFinal score: {}\n", session.score().separate_with_commas());
            push_menu(&mut out, session.menu());
        }
        Phase::Ranking => {
            out.push_str("RANKING\n\n");
            for (rank, entry) in session.ranking().entries().iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>2}. {:<15} {:>9}",
                    rank + 1,
                    entry.name,
                    entry.score.separate_with_commas()
                );
            }
            out.push('\n');
            push_menu(&mut out, session.menu());
        }
        Phase::EnterScore => {
            if let Some(entry) = session.score_entry() {
                let _ = writeln!(
                    out,
                    "NEW HIGH SCORE: {} (rank {})\n\nName: {}_",
                    entry.score.separate_with_commas(),
                    entry.index + 1,
                    entry.name
                );
            }
        }
    }

    if let Some(message) = session.hud_message() {
        let _ = writeln!(out, "\n[{}]", message.text);
    }
    out
}

fn push_hud(out: &mut String, session: &Session) {
    let _ = write!(
        out,
        "SCORE {}  LIVES {}  LEVEL {}",
        session.score().separate_with_commas(),
        session.lives(),
        session.level()
    );
    let pacman = session.pacman();
    if pacman.powered {
        let _ = write!(out, "  POWER {:.1}s", pacman.power_time_left);
    }
    out.push('\n');
}

fn push_board(out: &mut String, session: &Session) {
    let map = session.map();
    for row in 0..map.rows() {
        for col in 0..map.cols() {
            let pos = GridPosition::new(row as i32, col as i32);
            let ghost = session
                .ghosts()
                .iter()
                .find(|ghost| ghost.alive && ghost.position == pos);
            let glyph = if session.pacman().position == pos {
                PACMAN_GLYPH
            } else if let Some(ghost) = ghost {
                if ghost.vulnerable {
                    VULNERABLE_GHOST_GLYPH
                } else {
                    GHOST_GLYPH
                }
            } else {
                match map.get(pos) {
                    Tile::PlayerStart | Tile::GhostStart => ' ',
                    tile => tile.as_char(),
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }
}

fn push_menu(out: &mut String, menu: Option<&Menu>) {
    let Some(menu) = menu else {
        return;
    };
    for (index, action) in menu.items().iter().enumerate() {
        let cursor = if index == menu.selected() { '>' } else { ' ' };
        let _ = writeln!(out, "{cursor} {}", action.label());
    }
}
