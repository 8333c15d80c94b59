/// Caller-visible error taxonomy.
///
/// Every error pairs a stable code (e.g. "NOT_YOUR_TURN") with a human-readable message, so
/// RPC replies stay consistent whichever component rejected the request.
use thiserror::Error;

use crate::game::types::{MatchId, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("Player id {0} is already registered")]
    DuplicateId(PlayerId),

    #[error("Player {0} is not registered")]
    NotRegistered(PlayerId),

    #[error("Match {0} not found")]
    MatchNotFound(MatchId),

    #[error("Player {player} is not in match {match_id}")]
    PlayerNotInMatch { player: PlayerId, match_id: MatchId },

    #[error("Invalid choice '{0}': expected rock, paper or scissors")]
    InvalidChoice(String),

    #[error("It is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("Player {0} is not in the waiting pool")]
    NotWaiting(PlayerId),

    #[error("Player {0} is already in a match")]
    AlreadyInMatch(PlayerId),
}

impl ArenaError {
    /// Unique error code sent alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ArenaError::DuplicateId(_) => "DUPLICATE_ID",
            ArenaError::NotRegistered(_) => "NOT_REGISTERED",
            ArenaError::MatchNotFound(_) => "MATCH_NOT_FOUND",
            ArenaError::PlayerNotInMatch { .. } => "PLAYER_NOT_IN_MATCH",
            ArenaError::InvalidChoice(_) => "INVALID_CHOICE",
            ArenaError::NotYourTurn(_) => "NOT_YOUR_TURN",
            ArenaError::NotWaiting(_) => "NOT_WAITING",
            ArenaError::AlreadyInMatch(_) => "ALREADY_IN_MATCH",
        }
    }
}

pub type ArenaResult<T> = Result<T, ArenaError>;
