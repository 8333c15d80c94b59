/// Table of active matches.
///
/// Each match sits behind its own mutex so moves in different matches never contend. The
/// index (match id and player lookups) has a separate lock that is only held briefly and is
/// never held while waiting on a match lock.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use log::info;

use super::match_state::Match;
use crate::game::types::{MatchId, PlayerId};
use crate::server::error::{ArenaError, ArenaResult};
use crate::server::sync_utils::{lock, read, write};

pub type MatchHandle = Arc<Mutex<Match>>;

#[derive(Default)]
struct MatchIndex {
    by_id: HashMap<MatchId, MatchHandle>,
    by_player: HashMap<PlayerId, MatchId>,
}

pub struct MatchTable {
    index: RwLock<MatchIndex>,
    next_id: AtomicU64,
}

impl Default for MatchTable {
    fn default() -> Self {
        Self {
            index: RwLock::new(MatchIndex::default()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl MatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a match between two players; `first` moves first.
    pub fn create(&self, first: PlayerId, second: PlayerId) -> MatchId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut index = write(&self.index);
        index.by_player.insert(first.clone(), id);
        index.by_player.insert(second.clone(), id);
        info!("[MatchTable] Match {} created: {} vs {}", id, first, second);
        index.by_id.insert(id, Arc::new(Mutex::new(Match::new(id, first, second))));
        id
    }

    pub fn get(&self, id: MatchId) -> ArenaResult<MatchHandle> {
        read(&self.index)
            .by_id
            .get(&id)
            .cloned()
            .ok_or(ArenaError::MatchNotFound(id))
    }

    /// Lock a match and run `f` on it.
    ///
    /// A match removed while this caller waited for the lock is reported as not found.
    pub fn with_match<T>(&self, id: MatchId, f: impl FnOnce(&mut Match) -> ArenaResult<T>) -> ArenaResult<T> {
        let handle = self.get(id)?;
        let mut guard = lock(&handle);
        if guard.is_terminal() {
            return Err(ArenaError::MatchNotFound(id));
        }
        f(&mut *guard)
    }

    /// Detach a match the caller holds locked, clearing its pending choices.
    pub fn remove(&self, m: &mut Match) -> ArenaResult<()> {
        let mut index = write(&self.index);
        if index.by_id.remove(&m.id).is_none() {
            return Err(ArenaError::MatchNotFound(m.id));
        }
        for player in m.players() {
            if index.by_player.get(player) == Some(&m.id) {
                index.by_player.remove(player);
            }
        }
        m.close();
        info!("[MatchTable] Match {} removed", m.id);
        Ok(())
    }

    pub fn opponent_of(&self, id: MatchId, player: &PlayerId) -> ArenaResult<PlayerId> {
        self.with_match(id, |m| m.opponent_of(player).cloned())
    }

    /// Active match a player is seated in, if any.
    pub fn match_of(&self, player: &PlayerId) -> Option<MatchId> {
        read(&self.index).by_player.get(player).copied()
    }

    pub fn len(&self) -> usize {
        read(&self.index).by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let table = MatchTable::new();
        let first = table.create("A".into(), "B".into());
        table.with_match(first, |m| table.remove(m)).unwrap();
        let second = table.create("C".into(), "D".into());
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_remove_detaches_match_and_players() {
        let table = MatchTable::new();
        let id = table.create("A".into(), "B".into());
        assert_eq!(table.match_of(&"A".into()), Some(id));

        let handle = table.get(id).unwrap();
        table.with_match(id, |m| {
            m.submit(&"A".into(), "rock", 3)?;
            table.remove(m)
        }).unwrap();

        assert_eq!(table.get(id).unwrap_err(), ArenaError::MatchNotFound(id));
        assert_eq!(table.match_of(&"A".into()), None);
        assert_eq!(table.match_of(&"B".into()), None);
        assert_eq!(table.len(), 0);
        // A caller still holding the old handle sees a closed match with no pending choices.
        let stale = lock(&handle);
        assert!(stale.is_terminal());
        assert!(!stale.has_pending_choice(&"A".into()));
    }

    #[test]
    fn test_opponent_of_reports_missing_match_and_outsiders() {
        let table = MatchTable::new();
        let id = table.create("A".into(), "B".into());
        assert_eq!(table.opponent_of(id, &"B".into()).unwrap(), PlayerId::from("A"));
        assert!(matches!(
            table.opponent_of(id, &"C".into()),
            Err(ArenaError::PlayerNotInMatch { .. })
        ));
        assert_eq!(table.opponent_of(99, &"A".into()).unwrap_err(), ArenaError::MatchNotFound(99));
    }
}
