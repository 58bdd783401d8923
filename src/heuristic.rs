//! The computer player's move selection.
//!
//! A fixed-priority cascade: the first rule that produces a square wins
//! and nothing after it runs. The only nondeterminism is the uniform
//! tie-break inside [`best_choice`] and the open-corner pick, both fed
//! by the caller's RNG so tests can seed them.

use crate::lines::{CHOICE_HIERARCHY, WINNING_LINES};
use crate::position::Position;
use crate::types::{Board, Mark, Square};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Picks the computer's move for `mine` on the given board.
///
/// Rules, in order:
/// 1. take the center if it is open;
/// 2. complete a line of two `mine` marks;
/// 3. block a line of two opponent marks;
/// 4. block the double-threat forks the per-line scans cannot see;
/// 5. develop a corner/edge triple from [`CHOICE_HIERARCHY`];
/// 6. take a random open corner;
/// 7. take the first open square.
///
/// Returns `None` only when the board is full.
#[instrument(skip(board, rng), fields(mine = %mine))]
pub fn choose_move(board: &Board, mine: Mark, rng: &mut impl Rng) -> Option<Position> {
    let theirs = mine.opponent();

    if board.is_empty(Position::CenterMiddle) {
        debug!("taking open center");
        return Some(Position::CenterMiddle);
    }

    for line in &WINNING_LINES {
        if let Some(pos) = line_completion(board, line, mine) {
            debug!(position = %pos, "completing winning line");
            return Some(pos);
        }
    }

    for line in &WINNING_LINES {
        if let Some(pos) = line_completion(board, line, theirs) {
            debug!(position = %pos, "blocking opponent line");
            return Some(pos);
        }
    }

    if let Some(pos) = fork_block(board, mine, theirs) {
        debug!(position = %pos, "blocking fork");
        return Some(pos);
    }

    for triple in &CHOICE_HIERARCHY {
        if let Some(pos) = best_choice(board, triple, mine, rng) {
            debug!(position = %pos, "developing corner/edge triple");
            return Some(pos);
        }
    }

    if let Some(pos) = random_open_corner(board, rng) {
        debug!(position = %pos, "taking random open corner");
        return Some(pos);
    }

    let pos = Position::ALL.iter().copied().find(|p| board.is_empty(*p));
    if let Some(pos) = pos {
        debug!(position = %pos, "falling back to first open square");
    }
    pos
}

/// Returns the empty square of a line whose other two squares both hold
/// `mark`, checking the three slots in order.
fn line_completion(board: &Board, line: &[Position; 3], mark: Mark) -> Option<Position> {
    let m = Square::Occupied(mark);
    let [a, b, c] = *line;
    match (board.get(a), board.get(b), board.get(c)) {
        (Square::Empty, p1, p2) if p1 == m && p2 == m => Some(a),
        (p0, Square::Empty, p2) if p0 == m && p2 == m => Some(b),
        (p0, p1, Square::Empty) if p0 == m && p1 == m => Some(c),
        _ => None,
    }
}

/// Evaluates one corner/edge triple for the softer "take a developing
/// line" heuristic.
///
/// An empty square flanked by two `mark` squares wins outright. A
/// triple holding a single `mark` with two empties is ambiguous between
/// those two empties, resolved uniformly at random. Anything else
/// (opponent contamination, a fully empty triple) yields `None`.
pub fn best_choice(
    board: &Board,
    triple: &[Position; 3],
    mark: Mark,
    rng: &mut impl Rng,
) -> Option<Position> {
    let m = Square::Occupied(mark);
    let [a, b, c] = *triple;
    let state = (board.get(a), board.get(b), board.get(c));

    let slot: Option<usize> = match state {
        (Square::Empty, p1, p2) if p1 == m && p2 == m => Some(0),
        (p0, Square::Empty, p2) if p0 == m && p2 == m => Some(1),
        (p0, p1, Square::Empty) if p0 == m && p1 == m => Some(2),
        (Square::Empty, Square::Empty, p2) if p2 == m => [0, 1].choose(rng).copied(),
        (Square::Empty, p1, Square::Empty) if p1 == m => [0, 2].choose(rng).copied(),
        (p0, Square::Empty, Square::Empty) if p0 == m => [1, 2].choose(rng).copied(),
        _ => None,
    };

    slot.map(|index| triple[index])
}

/// Blocks the double-threat forks that rules 2-3 cannot see because no
/// single line holds two-in-a-row yet.
///
/// Only applies when the computer holds the center. Covers the
/// opposite-corner diagonal pair (answered with a free edge pair) and
/// the four L-shaped threats feeding an open corner.
fn fork_block(board: &Board, mine: Mark, theirs: Mark) -> Option<Position> {
    use Position::*;

    if board.get(CenterMiddle) != Square::Occupied(mine) {
        return None;
    }

    let t = Square::Occupied(theirs);

    let diagonal_pair = (board.get(LeftTop) == t && board.get(RightBottom) == t)
        || (board.get(RightTop) == t && board.get(LeftBottom) == t);
    if diagonal_pair {
        if board.is_empty(CenterTop) && board.is_empty(CenterBottom) {
            return Some(CenterTop);
        }
        if board.is_empty(LeftMiddle) && board.is_empty(RightMiddle) {
            return Some(LeftMiddle);
        }
    }

    if (board.get(CenterTop) == t || board.get(RightTop) == t)
        && (board.get(LeftMiddle) == t || board.get(LeftBottom) == t)
        && board.is_empty(LeftTop)
    {
        return Some(LeftTop);
    }

    if (board.get(CenterTop) == t || board.get(LeftTop) == t)
        && (board.get(RightMiddle) == t || board.get(RightBottom) == t)
        && board.is_empty(RightTop)
    {
        return Some(RightTop);
    }

    if (board.get(RightMiddle) == t || board.get(RightTop) == t)
        && (board.get(CenterBottom) == t || board.get(LeftBottom) == t)
        && board.is_empty(RightBottom)
    {
        return Some(RightBottom);
    }

    if (board.get(CenterBottom) == t || board.get(RightBottom) == t)
        && (board.get(LeftMiddle) == t || board.get(LeftTop) == t)
        && board.is_empty(LeftBottom)
    {
        return Some(LeftBottom);
    }

    None
}

/// Picks uniformly among the open corners, `None` if all four are taken.
fn random_open_corner(board: &Board, rng: &mut impl Rng) -> Option<Position> {
    let open: Vec<Position> = Position::CORNERS
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    open.choose(rng).copied()
}
