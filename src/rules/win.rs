//! Win detection over the fixed winning combinations.

use crate::lines::WINNING_LINES;
use crate::types::{Board, Mark, Square};
use tracing::instrument;

/// Scans the winning combinations in fixed order and returns the first
/// completed line as `(line_index, winner)`.
///
/// The scan stops at the first match: a board with two simultaneous
/// lines reports the one that comes first in [`WINNING_LINES`].
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(usize, Mark)> {
    for (index, [a, b, c]) in WINNING_LINES.iter().enumerate() {
        let sq = board.get(*a);
        if sq != Square::Empty && sq == board.get(*b) && sq == board.get(*c) {
            if let Square::Occupied(mark) = sq {
                return Some((index, mark));
            }
        }
    }
    None
}
