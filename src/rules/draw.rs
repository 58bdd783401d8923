//! Forced-draw detection for the one-empty-square endgame.

use crate::position::Position;
use crate::types::{Board, Mark, Square};
use tracing::instrument;

/// Detects a forced draw one move before the board fills.
///
/// When exactly one square remains empty, the final move is forced. If
/// placing `next` (the mark about to move) there cannot complete any
/// line, the game is already a draw and the pointless last input can be
/// skipped; this returns the forced position so the engine can play it
/// automatically. Returns `None` when more than one square is open,
/// when the board is already full, or when the forced move could still
/// win.
#[instrument(skip(board))]
pub fn forced_draw_move(board: &Board, next: Mark) -> Option<Position> {
    if board.empty_count() != 1 {
        return None;
    }

    let last = Position::ALL
        .iter()
        .copied()
        .find(|pos| board.is_empty(*pos))?;

    let mut scratch = board.clone();
    scratch.set(last, Square::Occupied(next));

    if super::winning_line(&scratch).is_some() {
        return None;
    }

    Some(last)
}
