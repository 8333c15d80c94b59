/// Match coordinator: the single entry point for every player action.
///
/// Pairs waiting players into matches, gates and applies moves, and tears matches down on
/// game over or forfeit. Every operation is non-blocking; callers poll instead of waiting on
/// each other.
///
/// Locks are always taken in the order waiting pool, match, match index, registry.
use log::{debug, info, warn};
use serde::Serialize;

use crate::config::ArenaConfig;
use crate::config::matchmaking::WAITING_MESSAGE;
use crate::game::types::{MatchId, PlayerId};
use crate::server::error::{ArenaError, ArenaResult};
use crate::server::game_session::{Match, MatchStatus, MatchTable, MoveOutcome, ScoreBoard};
use crate::server::matchmaking::types::{PlayerInfo, PlayerMeta};
use crate::server::matchmaking::{PlayerRegistry, WaitingPool};

/// Result of polling for a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FindOutcome {
    Matched { match_id: MatchId },
    /// Not paired yet; `position` is the zero-based place in the waiting pool, if queued.
    Waiting { position: Option<usize> },
}

/// Result of joining the waiting pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinOutcome {
    /// False when the player was already waiting.
    pub newly_added: bool,
    pub position: usize,
}

/// Result of a forfeit: the remaining player is credited with the win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForfeitOutcome {
    pub match_id: MatchId,
    pub forfeited_by: PlayerId,
    pub winner: PlayerId,
}

#[derive(Default)]
pub struct MatchCoordinator {
    config: ArenaConfig,
    players: PlayerRegistry,
    pool: WaitingPool,
    matches: MatchTable,
}

impl MatchCoordinator {
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            config,
            players: PlayerRegistry::new(),
            pool: WaitingPool::new(),
            matches: MatchTable::new(),
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn register(&self, id: PlayerId, meta: PlayerMeta) -> ArenaResult<PlayerInfo> {
        self.players.register(id, meta)
    }

    /// Forget a player who is not in a match, withdrawing them from the pool if waiting.
    ///
    /// Runs under the pool lock so a concurrent pairing either seats the player first (and the
    /// call fails) or never sees them.
    pub fn unregister(&self, id: &PlayerId) -> ArenaResult<PlayerInfo> {
        self.pool.withdraw_with(id, |_| {
            if self.matches.match_of(id).is_some() {
                return Err(ArenaError::AlreadyInMatch(id.clone()));
            }
            self.players.unregister(id)
        })
    }

    pub fn player(&self, id: &PlayerId) -> Option<PlayerInfo> {
        self.players.get(id)
    }

    /// Active match the player is seated in, if any.
    pub fn match_of(&self, id: &PlayerId) -> Option<MatchId> {
        self.matches.match_of(id)
    }

    /// Zero-based place in the waiting pool, if waiting.
    pub fn waiting_position(&self, id: &PlayerId) -> Option<usize> {
        self.pool.position(id)
    }

    /// Queue a registered player who is not in a match.
    ///
    /// Eligibility is checked with the pool locked, the same lock pairing holds, so a player
    /// cannot be seated and queued at once.
    pub fn join_waiting_pool(&self, id: &PlayerId) -> ArenaResult<JoinOutcome> {
        let (newly_added, position) = self.pool.enqueue_if(id.clone(), |id| {
            let player = self.players.get(id).ok_or_else(|| ArenaError::NotRegistered(id.clone()))?;
            if player.in_match || self.matches.match_of(id).is_some() {
                return Err(ArenaError::AlreadyInMatch(id.clone()));
            }
            Ok(())
        })?;
        Ok(JoinOutcome { newly_added, position })
    }

    pub fn leave_waiting_pool(&self, id: &PlayerId) -> ArenaResult<()> {
        self.pool.remove(id)
    }

    /// Return the caller's match, pairing the two earliest waiting players if possible.
    ///
    /// Pairing happens whoever polls; a caller that was not one of the paired two keeps
    /// waiting.
    pub fn find_or_create_match(&self, id: &PlayerId) -> ArenaResult<FindOutcome> {
        if !self.players.is_registered(id) {
            return Err(ArenaError::NotRegistered(id.clone()));
        }
        if let Some(match_id) = self.matches.match_of(id) {
            return Ok(FindOutcome::Matched { match_id });
        }

        self.pool.dequeue_pair_with(|first, second| {
            let match_id = self.matches.create(first.clone(), second.clone());
            self.players.set_in_match(&first, true);
            self.players.set_in_match(&second, true);
            info!(
                "[Coordinator] Paired {} and {} into match {} ({} active matches)",
                first, second, match_id, self.active_matches()
            );
        });
        // Either this call paired the caller, or a concurrent caller did while we waited on the pool.
        if let Some(match_id) = self.matches.match_of(id) {
            return Ok(FindOutcome::Matched { match_id });
        }
        debug!("[Coordinator] {}: {} ({} in pool)", id, WAITING_MESSAGE, self.waiting_count());
        Ok(FindOutcome::Waiting { position: self.pool.position(id) })
    }

    /// Validate, record and possibly resolve a move.
    ///
    /// Checks run in order: match exists, caller is a participant, choice is valid, caller
    /// holds the turn. A rejected move leaves the match unchanged.
    pub fn submit_move(&self, id: &PlayerId, match_id: MatchId, choice: &str) -> ArenaResult<MoveOutcome> {
        let win_threshold = self.config.win_threshold();
        let result = self.matches.with_match(match_id, |m| {
            let outcome = m.submit(id, choice, win_threshold)?;
            if let MoveOutcome::RoundResolved(report) | MoveOutcome::MatchWon { last_round: report, .. } = &outcome {
                let [(p1, c1), (p2, c2)] = &report.choices;
                debug!(
                    "[Coordinator] Match {} round {}: {} played {}, {} played {}",
                    match_id, report.round, p1, c1, p2, c2
                );
            }
            if let MoveOutcome::MatchWon { winner, .. } = &outcome {
                info!(
                    "[Coordinator] Match {} won by {} after {} rounds ({:?})",
                    match_id, winner, m.rounds_played(), m.scores()
                );
                self.finish(m)?;
            }
            Ok(outcome)
        });
        if let Err(err) = &result {
            warn!("[Coordinator] Move by {} in match {} rejected: {}", id, match_id, err);
        }
        result
    }

    /// End a match early; the other participant wins by forfeit.
    pub fn forfeit_match(&self, id: &PlayerId, match_id: MatchId) -> ArenaResult<ForfeitOutcome> {
        self.matches.with_match(match_id, |m| {
            let winner = m.opponent_of(id)?.clone();
            self.finish(m)?;
            info!("[Coordinator] {} forfeited match {}, {} wins", id, match_id, winner);
            Ok(ForfeitOutcome { match_id, forfeited_by: id.clone(), winner })
        })
    }

    pub fn current_turn(&self, match_id: MatchId) -> Option<PlayerId> {
        self.matches
            .with_match(match_id, |m| Ok(m.current_turn().clone()))
            .ok()
    }

    pub fn opponent_id(&self, id: &PlayerId, match_id: MatchId) -> ArenaResult<PlayerId> {
        self.matches.opponent_of(match_id, id)
    }

    pub fn score_snapshot(&self, match_id: MatchId) -> ArenaResult<ScoreBoard> {
        self.matches.with_match(match_id, |m| Ok(m.scores()))
    }

    pub fn match_status(&self, match_id: MatchId) -> ArenaResult<MatchStatus> {
        self.matches.with_match(match_id, |m| Ok(m.status(&self.config)))
    }

    pub fn waiting_count(&self) -> usize {
        self.pool.len()
    }

    pub fn active_matches(&self) -> usize {
        self.matches.len()
    }

    /// Remove a locked match from the table and release both players.
    fn finish(&self, m: &mut Match) -> ArenaResult<()> {
        self.matches.remove(m)?;
        for player in m.players() {
            self.players.set_in_match(player, false);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator_with(players: &[&str]) -> MatchCoordinator {
        let coordinator = MatchCoordinator::default();
        for id in players {
            coordinator.register((*id).into(), PlayerMeta::default()).unwrap();
        }
        coordinator
    }

    fn pair(coordinator: &MatchCoordinator, a: &str, b: &str) -> MatchId {
        coordinator.join_waiting_pool(&a.into()).unwrap();
        coordinator.join_waiting_pool(&b.into()).unwrap();
        match coordinator.find_or_create_match(&a.into()).unwrap() {
            FindOutcome::Matched { match_id } => match_id,
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn test_find_requires_registration() {
        let coordinator = coordinator_with(&[]);
        assert_eq!(
            coordinator.find_or_create_match(&"A".into()).unwrap_err(),
            ArenaError::NotRegistered("A".into())
        );
        assert_eq!(
            coordinator.join_waiting_pool(&"A".into()).unwrap_err(),
            ArenaError::NotRegistered("A".into())
        );
    }

    #[test]
    fn test_lone_player_keeps_waiting() {
        let coordinator = coordinator_with(&["A"]);
        coordinator.join_waiting_pool(&"A".into()).unwrap();
        assert_eq!(
            coordinator.find_or_create_match(&"A".into()).unwrap(),
            FindOutcome::Waiting { position: Some(0) }
        );
    }

    #[test]
    fn test_pairing_flags_players_and_refind_is_idempotent() {
        let coordinator = coordinator_with(&["A", "B"]);
        let match_id = pair(&coordinator, "A", "B");
        assert_eq!(match_id, 1);
        assert!(coordinator.player(&"A".into()).unwrap().in_match);
        assert!(coordinator.player(&"B".into()).unwrap().in_match);
        for id in ["A", "A", "B"] {
            assert_eq!(
                coordinator.find_or_create_match(&id.into()).unwrap(),
                FindOutcome::Matched { match_id }
            );
        }
        assert_eq!(coordinator.active_matches(), 1);
    }

    #[test]
    fn test_outsider_poll_pairs_others_but_keeps_waiting() {
        let coordinator = coordinator_with(&["A", "B", "C"]);
        for id in ["A", "B", "C"] {
            coordinator.join_waiting_pool(&id.into()).unwrap();
        }
        assert_eq!(
            coordinator.find_or_create_match(&"C".into()).unwrap(),
            FindOutcome::Waiting { position: Some(0) }
        );
        assert_eq!(coordinator.find_or_create_match(&"B".into()).unwrap(), FindOutcome::Matched { match_id: 1 });
    }

    #[test]
    fn test_join_rejected_while_in_match() {
        let coordinator = coordinator_with(&["A", "B"]);
        pair(&coordinator, "A", "B");
        assert_eq!(
            coordinator.join_waiting_pool(&"A".into()).unwrap_err(),
            ArenaError::AlreadyInMatch("A".into())
        );
    }

    #[test]
    fn test_duplicate_join_does_not_self_pair() {
        let coordinator = coordinator_with(&["A"]);
        assert!(coordinator.join_waiting_pool(&"A".into()).unwrap().newly_added);
        assert!(!coordinator.join_waiting_pool(&"A".into()).unwrap().newly_added);
        assert_eq!(coordinator.waiting_count(), 1);
        assert!(matches!(
            coordinator.find_or_create_match(&"A".into()).unwrap(),
            FindOutcome::Waiting { .. }
        ));
    }

    #[test]
    fn test_leave_waiting_pool() {
        let coordinator = coordinator_with(&["A", "B"]);
        coordinator.join_waiting_pool(&"A".into()).unwrap();
        coordinator.leave_waiting_pool(&"A".into()).unwrap();
        assert_eq!(
            coordinator.leave_waiting_pool(&"A".into()).unwrap_err(),
            ArenaError::NotWaiting("A".into())
        );
        coordinator.join_waiting_pool(&"B".into()).unwrap();
        assert_eq!(
            coordinator.find_or_create_match(&"B".into()).unwrap(),
            FindOutcome::Waiting { position: Some(0) }
        );
    }

    #[test]
    fn test_submit_move_to_unknown_match() {
        let coordinator = coordinator_with(&["A"]);
        assert_eq!(
            coordinator.submit_move(&"A".into(), 42, "rock").unwrap_err(),
            ArenaError::MatchNotFound(42)
        );
        assert_eq!(coordinator.current_turn(42), None);
    }

    #[test]
    fn test_forfeit_releases_both_players() {
        let coordinator = coordinator_with(&["A", "B", "C"]);
        let match_id = pair(&coordinator, "A", "B");
        assert!(matches!(
            coordinator.forfeit_match(&"C".into(), match_id),
            Err(ArenaError::PlayerNotInMatch { .. })
        ));
        let outcome = coordinator.forfeit_match(&"A".into(), match_id).unwrap();
        assert_eq!(outcome.winner, PlayerId::from("B"));
        assert!(!coordinator.player(&"A".into()).unwrap().in_match);
        assert!(!coordinator.player(&"B".into()).unwrap().in_match);
        assert_eq!(
            coordinator.forfeit_match(&"B".into(), match_id).unwrap_err(),
            ArenaError::MatchNotFound(match_id)
        );
        // Both can queue again.
        coordinator.join_waiting_pool(&"A".into()).unwrap();
        coordinator.join_waiting_pool(&"B".into()).unwrap();
        assert_eq!(
            coordinator.find_or_create_match(&"B".into()).unwrap(),
            FindOutcome::Matched { match_id: match_id + 1 }
        );
    }

    #[test]
    fn test_unregister() {
        let coordinator = coordinator_with(&["A", "B", "C"]);
        pair(&coordinator, "A", "B");
        assert_eq!(
            coordinator.unregister(&"A".into()).unwrap_err(),
            ArenaError::AlreadyInMatch("A".into())
        );
        coordinator.join_waiting_pool(&"C".into()).unwrap();
        coordinator.unregister(&"C".into()).unwrap();
        assert_eq!(coordinator.waiting_count(), 0);
        assert!(coordinator.player(&"C".into()).is_none());
        assert_eq!(
            coordinator.unregister(&"C".into()).unwrap_err(),
            ArenaError::NotRegistered("C".into())
        );
    }

    #[test]
    fn test_unregistered_player_cannot_rejoin_or_be_paired() {
        let coordinator = coordinator_with(&["A", "B"]);
        coordinator.join_waiting_pool(&"A".into()).unwrap();
        coordinator.unregister(&"A".into()).unwrap();
        assert_eq!(
            coordinator.join_waiting_pool(&"A".into()).unwrap_err(),
            ArenaError::NotRegistered("A".into())
        );
        coordinator.join_waiting_pool(&"B".into()).unwrap();
        assert_eq!(
            coordinator.find_or_create_match(&"B".into()).unwrap(),
            FindOutcome::Waiting { position: Some(0) }
        );
        assert_eq!(coordinator.waiting_position(&"A".into()), None);
    }

    #[test]
    fn test_failed_unregister_keeps_waiting_player_queued() {
        let coordinator = coordinator_with(&["A", "B", "C"]);
        pair(&coordinator, "A", "B");
        coordinator.join_waiting_pool(&"C".into()).unwrap();
        assert_eq!(
            coordinator.unregister(&"A".into()).unwrap_err(),
            ArenaError::AlreadyInMatch("A".into())
        );
        assert_eq!(coordinator.match_of(&"A".into()), Some(1));
        assert_eq!(coordinator.waiting_position(&"C".into()), Some(0));
    }

    #[test]
    fn test_status_tracks_rounds() {
        let coordinator = coordinator_with(&["A", "B"]);
        let match_id = pair(&coordinator, "A", "B");
        coordinator.submit_move(&"A".into(), match_id, "rock").unwrap();
        coordinator.submit_move(&"B".into(), match_id, "rock").unwrap();
        let status = coordinator.match_status(match_id).unwrap();
        assert_eq!(status.rounds_played, 1);
        assert_eq!(status.current_round, 2);
        assert_eq!(status.win_threshold, 3);
        assert_eq!(status.current_turn, PlayerId::from("A"));

        coordinator.submit_move(&"A".into(), match_id, "paper").unwrap();
        let status = coordinator.match_status(match_id).unwrap();
        assert_eq!(status.moved_this_round, vec![PlayerId::from("A")]);
    }
}
