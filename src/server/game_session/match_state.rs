//! State of a single head-to-head match.

use std::collections::BTreeMap;
use serde::Serialize;

use crate::config::ArenaConfig;
use crate::game::types::{Choice, MatchId, PlayerId};
use crate::server::error::{ArenaError, ArenaResult};

/// Round wins per participant.
pub type ScoreBoard = BTreeMap<PlayerId, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Active,
    Terminal,
}

/// A match between two seated players. Seat 0 moves first.
#[derive(Debug)]
pub struct Match {
    pub id: MatchId,
    pub(super) players: [PlayerId; 2],
    pub(super) scores: [u32; 2],
    pub(super) current_turn: usize,
    pub(super) pending: [Option<Choice>; 2],
    pub(super) rounds_played: u32,
    pub(super) phase: MatchPhase,
}

/// Read-only view of a match, as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchStatus {
    pub match_id: MatchId,
    pub players: [PlayerId; 2],
    pub scores: ScoreBoard,
    pub current_turn: PlayerId,
    /// Players whose move for the current round is already in.
    pub moved_this_round: Vec<PlayerId>,
    pub rounds_played: u32,
    pub current_round: u32,
    pub max_rounds: u32,
    pub win_threshold: u32,
}

impl Match {
    pub fn new(id: MatchId, first: PlayerId, second: PlayerId) -> Self {
        Self {
            id,
            players: [first, second],
            scores: [0, 0],
            current_turn: 0,
            pending: [None, None],
            rounds_played: 0,
            phase: MatchPhase::Active,
        }
    }

    pub fn players(&self) -> &[PlayerId; 2] {
        &self.players
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == MatchPhase::Terminal
    }

    pub fn current_turn(&self) -> &PlayerId {
        &self.players[self.current_turn]
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Seat index of a participant.
    pub fn seat_of(&self, player: &PlayerId) -> ArenaResult<usize> {
        self.players
            .iter()
            .position(|seated| seated == player)
            .ok_or_else(|| ArenaError::PlayerNotInMatch {
                player: player.clone(),
                match_id: self.id,
            })
    }

    pub fn opponent_of(&self, player: &PlayerId) -> ArenaResult<&PlayerId> {
        let seat = self.seat_of(player)?;
        Ok(&self.players[1 - seat])
    }

    pub fn has_pending_choice(&self, player: &PlayerId) -> bool {
        self.seat_of(player)
            .map(|seat| self.pending[seat].is_some())
            .unwrap_or(false)
    }

    pub fn scores(&self) -> ScoreBoard {
        self.players.iter().cloned().zip(self.scores).collect()
    }

    /// Mark the match as over and drop any half-played round.
    pub(super) fn close(&mut self) {
        self.pending = [None, None];
        self.phase = MatchPhase::Terminal;
    }

    pub fn status(&self, config: &ArenaConfig) -> MatchStatus {
        MatchStatus {
            match_id: self.id,
            players: self.players.clone(),
            scores: self.scores(),
            current_turn: self.current_turn().clone(),
            moved_this_round: self
                .players
                .iter()
                .filter(|player| self.has_pending_choice(player))
                .cloned()
                .collect(),
            rounds_played: self.rounds_played,
            current_round: self.rounds_played + 1,
            max_rounds: config.max_rounds,
            win_threshold: config.win_threshold(),
        }
    }
}
