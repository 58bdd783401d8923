//! The game engine: board ownership, turn state, and the move cascade.

use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::heuristic;
use crate::position::Position;
use crate::rules;
use crate::types::{Board, Mark, Square};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Why a move was not accepted.
///
/// In normal play these are swallowed by [`GameEngine::play`], which
/// treats duplicate and late input as no-ops; [`GameEngine::try_play`]
/// surfaces them for callers that want to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square is already occupied; first write wins.
    #[display("square {} is already occupied", _0)]
    SquareOccupied(Position),
    /// The game is already over.
    #[display("the game is already over")]
    GameOver,
    /// The computer's delayed reply is still pending.
    #[display("the computer is still thinking")]
    Thinking,
}

impl std::error::Error for MoveError {}

/// Serializable capture of the engine's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The board.
    pub board: Board,
    /// True when X acts next.
    pub x_to_move: bool,
    /// The mark the computer plays, `None` in two-player games.
    pub computer_mark: Option<Mark>,
    /// Whether the game reached a terminal state.
    pub game_over: bool,
    /// Whether a line was completed (`false` with `game_over` = draw).
    pub has_winner: bool,
    /// Index of the completed winning combination, if any.
    pub winning_line: Option<usize>,
    /// The current instructions text.
    pub instructions: String,
}

/// A tic-tac-toe game engine with a heuristic computer opponent.
///
/// The engine owns the board exclusively: external code reads it
/// through [`board`](Self::board) and mutates it only through the
/// guarded play entry points. A single logical turn runs synchronously
/// inside the call that triggered it -- a human move may cascade into
/// the computer's reply and a second round of win/draw detection before
/// the call returns.
#[derive(Debug)]
pub struct GameEngine {
    board: Board,
    x_to_move: bool,
    computer_mark: Option<Mark>,
    config: GameConfig,
    game_over: bool,
    has_winner: bool,
    winner: Option<Mark>,
    winning_line: Option<usize>,
    instructions: String,
    thinking: bool,
    rng: StdRng,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl GameEngine {
    /// Creates an engine and starts the first game.
    ///
    /// When the configuration says the computer starts, its first move
    /// is already on the board when this returns.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates an engine with a seeded RNG, for deterministic tests of
    /// the randomized tie-break rules.
    #[instrument]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let mut engine = Self {
            board: Board::new(),
            x_to_move: true,
            computer_mark: None,
            config,
            game_over: false,
            has_winner: false,
            winner: None,
            winning_line: None,
            instructions: String::new(),
            thinking: false,
            rng,
            subscribers: Vec::new(),
        };
        engine.play_again();
        engine
    }

    // ── Observable state ─────────────────────────────────────────

    /// The board, read-only.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The value of a single square.
    pub fn square(&self, pos: Position) -> Square {
        self.board.get(pos)
    }

    /// True when X acts next.
    pub fn x_to_move(&self) -> bool {
        self.x_to_move
    }

    /// The mark about to be placed by whichever side moves next.
    pub fn current_mark(&self) -> Mark {
        if self.x_to_move { Mark::X } else { Mark::O }
    }

    /// The mark the computer plays, `None` in two-player games.
    pub fn computer_mark(&self) -> Option<Mark> {
        self.computer_mark
    }

    /// Whether the game reached a terminal state.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether a line was completed. `false` with
    /// [`game_over`](Self::game_over) means the game was a draw.
    pub fn has_winner(&self) -> bool {
        self.has_winner
    }

    /// The winning mark, `None` while in progress or on a draw.
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Index (0-7) of the completed triple in
    /// [`WINNING_LINES`](crate::WINNING_LINES), `None` otherwise.
    pub fn winning_line(&self) -> Option<usize> {
        self.winning_line
    }

    /// Human-readable "next to move" or outcome text.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// True while a delayed computer reply is pending; input is
    /// ignored until it lands.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// The configuration consumed at the next reset.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect at the next
    /// [`play_again`](Self::play_again).
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    /// Sets the computer's thinking delay in milliseconds.
    pub fn set_think_delay(&mut self, millis: u64) {
        self.config.think_delay_ms = millis;
    }

    /// Captures the observable state for serialization or transport.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            x_to_move: self.x_to_move,
            computer_mark: self.computer_mark,
            game_over: self.game_over,
            has_winner: self.has_winner,
            winning_line: self.winning_line,
            instructions: self.instructions.clone(),
        }
    }

    /// Restores an engine from a snapshot, keeping the given
    /// configuration for subsequent resets.
    ///
    /// No reset runs and no events fire; play resumes exactly where
    /// the snapshot left off.
    #[instrument(skip(snapshot))]
    pub fn from_snapshot(config: GameConfig, snapshot: GameSnapshot) -> Self {
        let winner = snapshot
            .winning_line
            .and_then(|_| rules::winning_line(&snapshot.board))
            .map(|(_, mark)| mark);
        Self {
            board: snapshot.board,
            x_to_move: snapshot.x_to_move,
            computer_mark: snapshot.computer_mark,
            config,
            game_over: snapshot.game_over,
            has_winner: snapshot.has_winner,
            winner,
            winning_line: snapshot.winning_line,
            instructions: snapshot.instructions,
            thinking: false,
            rng: StdRng::from_entropy(),
            subscribers: Vec::new(),
        }
    }

    // ── Eventing ─────────────────────────────────────────────────

    /// Subscribes to the engine's change notifications.
    ///
    /// Events are delivered in the order the engine applies them.
    /// Dropped receivers are pruned on the next send.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Attempts to play the current turn's mark at `pos`, cascading
    /// into the computer's immediate reply when one is due.
    ///
    /// # Errors
    ///
    /// Fails without side effects when the game is over, the square is
    /// taken, or a delayed computer reply is pending.
    #[instrument(skip(self), fields(pos = %pos, mark = %self.current_mark()))]
    pub fn try_play(&mut self, pos: Position) -> Result<(), MoveError> {
        self.accept(pos)?;
        if self.check_if_computer_play() {
            self.let_computer_play_turn();
            self.check_winner_or_draw();
        }
        Ok(())
    }

    /// Like [`try_play`](Self::try_play), but treats rejected input as
    /// a no-op. Duplicate clicks and clicks after the game ends are
    /// tolerated by design.
    pub fn play(&mut self, pos: Position) {
        if let Err(reason) = self.try_play(pos) {
            debug!(%pos, %reason, "ignoring move");
        }
    }

    /// Async variant of [`try_play`](Self::try_play) that pauses for
    /// the configured thinking delay before the computer's reply.
    ///
    /// While the pause is pending the engine reports
    /// [`is_thinking`](Self::is_thinking) and rejects new input.
    /// Dropping the future mid-delay leaves the engine thinking;
    /// [`play_again`](Self::play_again) clears the flag.
    ///
    /// # Errors
    ///
    /// Same conditions as [`try_play`](Self::try_play).
    pub async fn play_with_delay(&mut self, pos: Position) -> Result<(), MoveError> {
        self.accept(pos)?;
        if self.check_if_computer_play() {
            self.thinking = true;
            tokio::time::sleep(self.config.think_delay()).await;
            self.thinking = false;
            self.let_computer_play_turn();
            self.check_winner_or_draw();
        }
        Ok(())
    }

    /// Validates and applies one human move, then re-evaluates the
    /// board, without involving the computer.
    fn accept(&mut self, pos: Position) -> Result<(), MoveError> {
        if self.thinking {
            return Err(MoveError::Thinking);
        }
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        self.place(pos);
        self.check_winner_or_draw();
        Ok(())
    }

    /// Stores the current turn's mark at `pos`, flips the turn, and
    /// refreshes the instructions. Callers must have validated `pos`.
    fn place(&mut self, pos: Position) {
        let mark = self.current_mark();
        self.board.set(pos, Square::Occupied(mark));
        self.emit(GameEvent::SquareChanged {
            position: pos,
            square: Square::Occupied(mark),
        });
        self.x_to_move = !self.x_to_move;
        self.emit(GameEvent::TurnChanged {
            x_to_move: self.x_to_move,
        });
        self.update_instructions();
    }

    /// Resets board, turn, and outcome state for a fresh game and
    /// re-evaluates who moves first.
    ///
    /// The computer plays X when [`GameConfig::computer_starts`] is
    /// set, O otherwise, and no mark at all in two-player games. A
    /// computer that starts moves immediately.
    #[instrument(skip(self))]
    pub fn play_again(&mut self) {
        self.board = Board::new();
        self.game_over = false;
        self.has_winner = false;
        self.winner = None;
        self.winning_line = None;
        self.thinking = false;
        self.x_to_move = true;
        self.computer_mark = if self.config.two_player {
            None
        } else if self.config.computer_starts {
            Some(Mark::X)
        } else {
            Some(Mark::O)
        };
        self.emit(GameEvent::BoardReset);
        self.update_instructions();

        if self.check_if_computer_play() {
            self.let_computer_play_turn();
            self.check_winner_or_draw();
        }
    }

    // ── Computer turn ────────────────────────────────────────────

    /// True when the side to move is the computer.
    ///
    /// Derived from the turn flag and the computer's mark on every
    /// call; never cached.
    pub fn is_computers_turn(&self) -> bool {
        match self.computer_mark {
            None => false,
            Some(mark) => (mark == Mark::X) == self.x_to_move,
        }
    }

    /// Whether the computer should move now: not in a two-player game,
    /// not after the game ended, and only on its own turn.
    pub fn check_if_computer_play(&self) -> bool {
        if self.config.two_player {
            return false;
        }
        if self.game_over {
            return false;
        }
        self.is_computers_turn()
    }

    /// Runs the move-selection cascade and plays the chosen square.
    ///
    /// Expects to be called on the computer's turn with the game still
    /// open; a full board makes this a no-op.
    #[instrument(skip(self))]
    pub fn let_computer_play_turn(&mut self) {
        let mine = self.current_mark();
        match heuristic::choose_move(&self.board, mine, &mut self.rng) {
            Some(pos) => {
                self.place(pos);
                self.emit(GameEvent::ComputerPlayed {
                    position: pos,
                    mark: mine,
                });
            }
            None => warn!("no open square for the computer to play"),
        }
    }

    // ── Win/draw detection ───────────────────────────────────────

    /// Drives the board to a terminal decision if one is due.
    ///
    /// Scans the winning combinations in fixed order; the first
    /// completed triple ends the game and records its index for the
    /// overlay. With no winner and at most one empty square, the game
    /// is a tie -- and when the single remaining move cannot complete a
    /// line, that move is played automatically so the forced draw does
    /// not wait for a pointless final click.
    #[instrument(skip(self))]
    pub fn check_winner_or_draw(&mut self) {
        if self.game_over {
            return;
        }
        self.winning_line = None;

        if let Some((index, mark)) = rules::winning_line(&self.board) {
            self.winning_line = Some(index);
            self.has_winner = true;
            self.winner = Some(mark);
            self.game_over = true;
            self.set_instructions(format!("'{mark}' Wins"));
            self.emit(GameEvent::GameOver {
                winner: Some(mark),
                winning_line: Some(index),
            });
            return;
        }

        match self.board.empty_count() {
            0 => self.declare_tie(),
            1 => {
                if let Some(pos) = rules::forced_draw_move(&self.board, self.current_mark()) {
                    debug!(%pos, "auto-playing forced final move");
                    self.place(pos);
                    self.declare_tie();
                }
            }
            _ => {}
        }
    }

    fn declare_tie(&mut self) {
        self.game_over = true;
        self.set_instructions("Tie".to_string());
        self.emit(GameEvent::GameOver {
            winner: None,
            winning_line: None,
        });
    }

    // ── Instructions ─────────────────────────────────────────────

    /// Announces whose move comes next.
    pub fn update_instructions(&mut self) {
        let turn = self.current_mark();
        self.set_instructions(format!("'{turn}' goes next."));
    }

    /// Announces the side that just moved instead of the next mover.
    pub fn update_instructions_reverse(&mut self) {
        let turn = self.current_mark().opponent();
        self.set_instructions(format!("'{turn}' goes next."));
    }

    fn set_instructions(&mut self, text: String) {
        self.instructions = text.clone();
        self.emit(GameEvent::InstructionsChanged(text));
    }
}

macro_rules! square_surface {
    ($(#[$doc:meta] $getter:ident, $command:ident => $pos:ident;)*) => {
        impl GameEngine {
            $(
                #[$doc]
                pub fn $getter(&self) -> Square {
                    self.square(Position::$pos)
                }
            )*
            $(
                /// Click-style command for the matching square; see
                /// [`play`](Self::play).
                pub fn $command(&mut self) {
                    self.play(Position::$pos);
                }
            )*
        }
    };
}

square_surface! {
    /// [0] Value of the left-top square.
    left_top, play_left_top => LeftTop;
    /// [1] Value of the center-top square.
    center_top, play_center_top => CenterTop;
    /// [2] Value of the right-top square.
    right_top, play_right_top => RightTop;
    /// [3] Value of the left-middle square.
    left_middle, play_left_middle => LeftMiddle;
    /// [4] Value of the center square.
    center_middle, play_center_middle => CenterMiddle;
    /// [5] Value of the right-middle square.
    right_middle, play_right_middle => RightMiddle;
    /// [6] Value of the left-bottom square.
    left_bottom, play_left_bottom => LeftBottom;
    /// [7] Value of the center-bottom square.
    center_bottom, play_center_bottom => CenterBottom;
    /// [8] Value of the right-bottom square.
    right_bottom, play_right_bottom => RightBottom;
}
