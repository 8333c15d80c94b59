/// Move submission and round resolution for a single match.
///
/// The turn flips after every accepted move. Once both seats hold a choice the round is
/// resolved, scored, and both choices are cleared together.
use log::debug;

use super::match_state::{Match, ScoreBoard};
use crate::game::resolver::resolve;
use crate::game::types::{Choice, PlayerId, RoundOutcome};
use crate::server::error::{ArenaError, ArenaResult};

/// What happened in a completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub round: u32,
    pub choices: [(PlayerId, Choice); 2],
    pub winner: Option<PlayerId>,
    pub scores: ScoreBoard,
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move is stored; the opponent has not moved this round yet.
    AwaitingOpponent,
    /// Both choices were in; the round was scored and the match goes on.
    RoundResolved(RoundReport),
    /// The round winner reached the win threshold.
    MatchWon { winner: PlayerId, last_round: RoundReport },
}

impl MoveOutcome {
    /// Human-readable reply for the RPC layer.
    pub fn message(&self) -> String {
        match self {
            MoveOutcome::AwaitingOpponent => "Move recorded, waiting for the opponent's move".to_string(),
            MoveOutcome::RoundResolved(report) => match &report.winner {
                Some(winner) => format!("{} wins round {}", winner, report.round),
                None => format!("Round {} is a draw", report.round),
            },
            MoveOutcome::MatchWon { winner, .. } => format!("{} wins the match", winner),
        }
    }
}

impl Match {
    /// Validate and apply a move.
    ///
    /// Checks run in order (participant, choice, turn) and the first failure is returned with
    /// the match untouched. The caller has already checked that the match is still active.
    pub fn submit(&mut self, player: &PlayerId, raw_choice: &str, win_threshold: u32) -> ArenaResult<MoveOutcome> {
        let seat = self.seat_of(player)?;
        let choice = Choice::parse(raw_choice)
            .ok_or_else(|| ArenaError::InvalidChoice(raw_choice.to_string()))?;
        if self.current_turn != seat {
            return Err(ArenaError::NotYourTurn(player.clone()));
        }

        self.pending[seat] = Some(choice);
        self.current_turn = 1 - seat;
        debug!("[Match {}] {} played {}", self.id, player, choice);

        match self.resolve_round() {
            None => Ok(MoveOutcome::AwaitingOpponent),
            Some(report) => {
                let winner = report
                    .winner
                    .clone()
                    .filter(|winner| report.scores.get(winner).copied().unwrap_or(0) >= win_threshold);
                Ok(match winner {
                    Some(winner) => MoveOutcome::MatchWon { winner, last_round: report },
                    None => MoveOutcome::RoundResolved(report),
                })
            }
        }
    }

    /// Score the round if both choices are present.
    fn resolve_round(&mut self) -> Option<RoundReport> {
        let (Some(first), Some(second)) = (self.pending[0], self.pending[1]) else {
            return None;
        };
        self.pending = [None, None];
        self.rounds_played += 1;

        let winner_seat = match resolve(first, second) {
            RoundOutcome::FirstWins => Some(0),
            RoundOutcome::SecondWins => Some(1),
            RoundOutcome::Draw => None,
        };
        if let Some(seat) = winner_seat {
            self.scores[seat] += 1;
        }

        let [p1, p2] = &self.players;
        Some(RoundReport {
            round: self.rounds_played,
            choices: [(p1.clone(), first), (p2.clone(), second)],
            winner: winner_seat.map(|seat| self.players[seat].clone()),
            scores: self.scores(),
        })
    }
}
