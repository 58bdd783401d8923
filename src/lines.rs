//! Fixed line groupings used by win detection and the heuristic.

use crate::position::Position;

/// The eight winning combinations, in reporting order: rows top to
/// bottom, columns left to right, main diagonal, anti-diagonal.
///
/// The index of the first matching triple is the winning selection the
/// presentation layer uses to place its winning-line overlay, so this
/// order is part of the engine's contract.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::LeftTop, Position::CenterTop, Position::RightTop],
    [
        Position::LeftMiddle,
        Position::CenterMiddle,
        Position::RightMiddle,
    ],
    [
        Position::LeftBottom,
        Position::CenterBottom,
        Position::RightBottom,
    ],
    // Columns
    [Position::LeftTop, Position::LeftMiddle, Position::LeftBottom],
    [
        Position::CenterTop,
        Position::CenterMiddle,
        Position::CenterBottom,
    ],
    [
        Position::RightTop,
        Position::RightMiddle,
        Position::RightBottom,
    ],
    // Diagonals
    [
        Position::LeftTop,
        Position::CenterMiddle,
        Position::RightBottom,
    ],
    [
        Position::RightTop,
        Position::CenterMiddle,
        Position::LeftBottom,
    ],
];

/// The six corner/edge triples scanned by the secondary blocking
/// heuristic, in priority order.
///
/// These are positional groupings, not winning lines: each triple leads
/// with a corner and lists the squares that develop play around it.
pub const CHOICE_HIERARCHY: [[Position; 3]; 6] = [
    [Position::LeftTop, Position::RightTop, Position::LeftBottom],
    [Position::RightTop, Position::RightBottom, Position::LeftBottom],
    [Position::LeftBottom, Position::RightBottom, Position::RightTop],
    [Position::RightBottom, Position::LeftTop, Position::RightTop],
    [Position::LeftTop, Position::CenterTop, Position::LeftMiddle],
    [Position::CenterTop, Position::RightTop, Position::RightMiddle],
];
