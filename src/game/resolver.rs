//! Round resolution for rock-paper-scissors.

use crate::game::types::{Choice, RoundOutcome};

/// Decide a round between two choices.
///
/// Every one of the nine ordered pairs is listed explicitly so the compiler checks the table
/// is total: rock beats scissors, scissors beats paper, paper beats rock.
pub fn resolve(first: Choice, second: Choice) -> RoundOutcome {
    use Choice::*;
    use RoundOutcome::*;

    match (first, second) {
        (Rock, Scissors) => FirstWins,
        (Scissors, Paper) => FirstWins,
        (Paper, Rock) => FirstWins,
        (Scissors, Rock) => SecondWins,
        (Paper, Scissors) => SecondWins,
        (Rock, Paper) => SecondWins,
        (Rock, Rock) => Draw,
        (Paper, Paper) => Draw,
        (Scissors, Scissors) => Draw,
    }
}
