//! Game configuration consumed at reset time.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{instrument, warn};

/// Configuration the engine reads when a new game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Two humans share the board; the computer never moves.
    pub two_player: bool,
    /// The computer takes the first move (and therefore plays X).
    pub computer_starts: bool,
    /// Artificial pause before the computer's move is applied, for
    /// pacing only. Zero means the computer replies immediately.
    pub think_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            two_player: false,
            computer_starts: false,
            think_delay_ms: 0,
        }
    }
}

impl GameConfig {
    /// Creates the default configuration: one human against the
    /// computer, human first, no thinking delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// The thinking delay as a [`Duration`].
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Applies string key/value pairs, as handed over by a menu screen
    /// or navigation layer.
    ///
    /// Recognized keys are `two_player` and `computer_starts` (ASCII
    /// case-insensitive, `TwoPlayer`-style casing included). Unknown
    /// keys and unparseable booleans are logged and skipped; the
    /// affected setting keeps its previous value. This never fails.
    #[instrument(skip(pairs))]
    pub fn apply_query<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in pairs {
            let target = if key.eq_ignore_ascii_case("two_player")
                || key.eq_ignore_ascii_case("twoplayer")
            {
                Some(&mut self.two_player)
            } else if key.eq_ignore_ascii_case("computer_starts")
                || key.eq_ignore_ascii_case("computerstarts")
            {
                Some(&mut self.computer_starts)
            } else {
                warn!(key, "ignoring unknown configuration key");
                None
            };

            if let Some(target) = target {
                match value.trim().to_ascii_lowercase().parse::<bool>() {
                    Ok(parsed) => *target = parsed,
                    Err(_) => warn!(key, value, "ignoring unparseable boolean"),
                }
            }
        }
    }
}
