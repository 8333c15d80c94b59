/// Game configuration constants.
/// 
/// This module defines the match length and the win threshold derived from it.
pub const MAX_ROUNDS: u32 = 5; // Best-of-five by default.

/// Runtime game settings handed to the match coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Maximum number of decisive rounds a match is played over ("best of N").
    pub max_rounds: u32,
}

impl ArenaConfig {
    /// Create a config for a best-of-`max_rounds` match. Zero is clamped to one round.
    pub fn new(max_rounds: u32) -> Self {
        Self { max_rounds: max_rounds.max(1) }
    }

    /// Number of round wins that ends a match: a strict majority of `max_rounds`.
    pub fn win_threshold(&self) -> u32 {
        self.max_rounds / 2 + 1
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(MAX_ROUNDS)
    }
}
