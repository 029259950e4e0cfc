//! Move legality and the flip algorithm.

use crate::{Board, Color, Position};
use std::collections::BTreeSet;
use tracing::instrument;

/// The eight compass directions as `(d_row, d_col)`.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Opponent discs bracketed between `pos` and a `color` disc along one
/// direction. Empty when the run hits an empty cell or the edge first.
fn run_in_direction(board: &Board, color: Color, pos: Position, (dr, dc): (isize, isize)) -> Vec<Position> {
    let mut run = Vec::new();
    let mut cursor = pos.offset(dr, dc);
    while let Some(cell) = cursor {
        match board.get(cell) {
            Some(c) if c == color.other() => run.push(cell),
            Some(_) => return run,
            None => break,
        }
        cursor = cell.offset(dr, dc);
    }
    Vec::new()
}

/// Discs that flip if `color` plays at `pos`.
///
/// An empty result means the move is illegal, including when `pos` is
/// already occupied.
#[instrument(skip(board))]
pub fn captures(board: &Board, color: Color, pos: Position) -> BTreeSet<Position> {
    if !board.is_empty_at(pos) {
        return BTreeSet::new();
    }
    DIRECTIONS
        .iter()
        .flat_map(|dir| run_in_direction(board, color, pos, *dir))
        .collect()
}

/// Checks whether `color` may play at `pos`.
pub fn is_legal(board: &Board, color: Color, pos: Position) -> bool {
    board.is_empty_at(pos)
        && DIRECTIONS
            .iter()
            .any(|dir| !run_in_direction(board, color, pos, *dir).is_empty())
}

/// Every legal move for `color`, recomputed from the board.
#[instrument(skip(board))]
pub fn valid_moves(board: &Board, color: Color) -> BTreeSet<Position> {
    Position::all()
        .filter(|pos| is_legal(board, color, *pos))
        .collect()
}
