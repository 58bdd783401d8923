//! Change notifications emitted by the engine.

use crate::position::Position;
use crate::types::{Mark, Square};
use serde::{Deserialize, Serialize};

/// A typed change notification from the engine.
///
/// The presentation layer subscribes with
/// [`GameEngine::subscribe`](crate::GameEngine::subscribe) and reacts to
/// each variant independently: square events update the grid, the
/// game-over event positions the winning-line overlay, and so on.
/// Delivery is synchronous and ordering-preserving; the engine never
/// waits on its subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A square changed value.
    SquareChanged {
        /// The square that changed.
        position: Position,
        /// Its new value.
        square: Square,
    },
    /// The side to move changed.
    TurnChanged {
        /// True when X acts next.
        x_to_move: bool,
    },
    /// The instructions text changed.
    InstructionsChanged(String),
    /// The game reached a terminal state.
    GameOver {
        /// The winning mark, `None` on a draw.
        winner: Option<Mark>,
        /// Index into the winning combinations, `None` on a draw.
        winning_line: Option<usize>,
    },
    /// The board was cleared for a new game.
    BoardReset,
    /// The computer placed a mark.
    ///
    /// Carries the chosen square and the mark placed, for integrations
    /// that mirror the board instead of reading it from the engine.
    ComputerPlayed {
        /// The square the computer chose.
        position: Position,
        /// The mark it placed there.
        mark: Mark,
    },
}
