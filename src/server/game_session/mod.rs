/// Game session module: per-match state, turn resolution and the table of active matches.

pub mod match_state;
pub mod match_table;
pub mod turn_resolution;

pub use match_state::{Match, MatchStatus, ScoreBoard};
pub use match_table::MatchTable;
pub use turn_resolution::MoveOutcome;
