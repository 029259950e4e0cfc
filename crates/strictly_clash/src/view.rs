//! Text rendering of a session.

use std::collections::BTreeSet;
use std::fmt::Write;
use strictly_clash::Clash;
use strictly_reversi::{BOARD_SIZE, Color, Game, GameStatus, Position};

const BLACK: char = '#';
const WHITE: char = '@';
const EMPTY: char = '.';
const TARGET: char = '*';

fn symbol(color: Color) -> char {
    match color {
        Color::Black => BLACK,
        Color::White => WHITE,
    }
}

/// Renders the board grid with row numbers and column letters, marking
/// `targets` with `*`.
pub fn render_board(game: &Game, targets: &BTreeSet<Position>) -> String {
    let mut out = String::from("  ");
    for col in 0..BOARD_SIZE {
        out.push(' ');
        out.push((b'A' + col as u8) as char);
    }
    out.push('\n');

    for (i, pos) in Position::all().enumerate() {
        if i % BOARD_SIZE == 0 {
            let _ = write!(out, "{} ", pos.row());
        }
        let cell = match game.board().get(pos) {
            Some(color) => symbol(color),
            None if targets.contains(&pos) => TARGET,
            None => EMPTY,
        };
        out.push(' ');
        out.push(cell);
        if i % BOARD_SIZE == BOARD_SIZE - 1 {
            out.push('\n');
        }
    }
    out
}

/// One-line status, e.g. `WHITE to move (passed)`.
pub fn render_status(status: GameStatus) -> String {
    match status {
        GameStatus::Active(color) => format!("{} to move", color),
        GameStatus::Passed(color) => format!("{} to move (opponent passed)", color),
        GameStatus::Won(color) => format!("{} wins", color),
        GameStatus::Drawn => "Draw".to_string(),
    }
}

/// Legal moves to highlight for the session, if its side wants them and
/// may act.
pub fn targets(clash: &Clash) -> BTreeSet<Position> {
    match (clash.game(), clash.side()) {
        (Some(game), Some(side)) if side.show_targets => {
            let ours = !clash.is_remote() || game.turn() == Some(side.color);
            if ours {
                game.valid_moves()
            } else {
                BTreeSet::new()
            }
        }
        _ => BTreeSet::new(),
    }
}

/// Full session view: header, board, counts and status.
pub fn render(clash: &Clash) -> String {
    let (Some(game), Some(side)) = (clash.game(), clash.side()) else {
        return "No game. Use `new` or `join`.\n".to_string();
    };

    let mut out = match clash.name() {
        Some(name) => format!("Game '{}' - you play {}\n", name, side.color),
        None => format!("Local game - {} opened\n", side.color),
    };
    out.push_str(&render_board(game, &targets(clash)));
    let _ = writeln!(
        out,
        "{} {}: {}  {} {}: {}",
        BLACK,
        Color::Black,
        game.board().count(Color::Black),
        WHITE,
        Color::White,
        game.board().count(Color::White)
    );
    let _ = writeln!(out, "{}", render_status(game.status()));
    out
}
