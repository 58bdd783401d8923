//! Event-driven tic-tac-toe engine with a heuristic computer opponent.
//!
//! The engine owns a 3x3 board, the turn state, and the computer's
//! move-selection heuristic. A presentation layer drives it through the
//! guarded play commands and reacts to the typed [`GameEvent`] stream;
//! everything else -- rendering, navigation, input handling -- lives
//! outside this crate.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameConfig, GameEngine, Position, Square, Mark};
//!
//! // Human plays X, computer replies as O.
//! let mut engine = GameEngine::with_seed(GameConfig::default(), 42);
//! let mut events = engine.subscribe();
//!
//! engine.play(Position::LeftTop);
//!
//! // The computer always answers an open center with the center.
//! assert_eq!(engine.square(Position::CenterMiddle), Square::Occupied(Mark::O));
//! assert!(events.try_recv().is_ok());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod event;
mod heuristic;
mod lines;
mod position;
mod rules;
mod types;

pub use config::GameConfig;
pub use engine::{GameEngine, GameSnapshot, MoveError};
pub use event::GameEvent;
pub use heuristic::{best_choice, choose_move};
pub use lines::{CHOICE_HIERARCHY, WINNING_LINES};
pub use position::Position;
pub use rules::{forced_draw_move, winning_line};
pub use types::{Board, Mark, Square};
