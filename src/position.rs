//! Named board positions and their index mapping.

use crate::types::Board;
use serde::{Deserialize, Serialize};

/// A position on the tic-tac-toe board.
///
/// Positions map one-to-one onto row-major board indices 0-8
/// (`LeftTop` = 0 at the top-left through `RightBottom` = 8 at the
/// bottom-right). "No such position" is expressed as `Option::None`
/// rather than a sentinel value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Position {
    /// Top-left corner (index 0).
    LeftTop,
    /// Top edge (index 1).
    CenterTop,
    /// Top-right corner (index 2).
    RightTop,
    /// Left edge (index 3).
    LeftMiddle,
    /// Center (index 4).
    CenterMiddle,
    /// Right edge (index 5).
    RightMiddle,
    /// Bottom-left corner (index 6).
    LeftBottom,
    /// Bottom edge (index 7).
    CenterBottom,
    /// Bottom-right corner (index 8).
    RightBottom,
}

impl Position {
    /// All nine positions in board order.
    pub const ALL: [Position; 9] = [
        Position::LeftTop,
        Position::CenterTop,
        Position::RightTop,
        Position::LeftMiddle,
        Position::CenterMiddle,
        Position::RightMiddle,
        Position::LeftBottom,
        Position::CenterBottom,
        Position::RightBottom,
    ];

    /// The four corner positions.
    pub const CORNERS: [Position; 4] = [
        Position::LeftTop,
        Position::RightTop,
        Position::LeftBottom,
        Position::RightBottom,
    ];

    /// Converts the position to its board index (0-8).
    pub fn to_index(self) -> usize {
        match self {
            Position::LeftTop => 0,
            Position::CenterTop => 1,
            Position::RightTop => 2,
            Position::LeftMiddle => 3,
            Position::CenterMiddle => 4,
            Position::RightMiddle => 5,
            Position::LeftBottom => 6,
            Position::CenterBottom => 7,
            Position::RightBottom => 8,
        }
    }

    /// Creates a position from a board index, `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Position::ALL.get(index).copied()
    }

    /// Display label for this position.
    pub fn label(self) -> &'static str {
        match self {
            Position::LeftTop => "left-top",
            Position::CenterTop => "center-top",
            Position::RightTop => "right-top",
            Position::LeftMiddle => "left-middle",
            Position::CenterMiddle => "center-middle",
            Position::RightMiddle => "right-middle",
            Position::LeftBottom => "left-bottom",
            Position::CenterBottom => "center-bottom",
            Position::RightBottom => "right-bottom",
        }
    }

    /// Returns the positions that are still empty on the given board.
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        <Position as strum::IntoEnumIterator>::iter()
            .filter(|pos| board.is_empty(*pos))
            .collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mark, Square};

    #[test]
    fn index_round_trip() {
        for (index, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.to_index(), index);
            assert_eq!(Position::from_index(index), Some(*pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn valid_moves_filters_occupied() {
        let mut board = Board::new();
        board.set(Position::LeftTop, Square::Occupied(Mark::X));
        board.set(Position::CenterMiddle, Square::Occupied(Mark::O));

        let valid = Position::valid_moves(&board);
        assert_eq!(valid.len(), 7);
        assert!(!valid.contains(&Position::LeftTop));
        assert!(!valid.contains(&Position::CenterMiddle));
        assert!(valid.contains(&Position::RightBottom));
    }
}
