/// Registry of known players and their in-match flag.
use std::collections::HashMap;
use std::sync::RwLock;
use log::{debug, info};

use super::types::{PlayerInfo, PlayerMeta};
use crate::game::types::PlayerId;
use crate::server::error::{ArenaError, ArenaResult};
use crate::server::sync_utils::{read, write};

#[derive(Default)]
pub struct PlayerRegistry {
    players: RwLock<HashMap<PlayerId, PlayerInfo>>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new player. Fails if the id is already taken.
    pub fn register(&self, id: PlayerId, meta: PlayerMeta) -> ArenaResult<PlayerInfo> {
        let mut players = write(&self.players);
        if players.contains_key(&id) {
            return Err(ArenaError::DuplicateId(id));
        }
        let info = PlayerInfo::new(id.clone(), meta);
        players.insert(id, info.clone());
        info!(
            "[Registry] Player {} registered as {} (port {:?}, {} registered)",
            info.id, info.username, info.port, players.len()
        );
        Ok(info)
    }

    /// Forget a player. Callers check waiting/match membership first.
    pub fn unregister(&self, id: &PlayerId) -> ArenaResult<PlayerInfo> {
        let mut players = write(&self.players);
        let in_match = players
            .get(id)
            .map(|player| player.in_match)
            .ok_or_else(|| ArenaError::NotRegistered(id.clone()))?;
        if in_match {
            return Err(ArenaError::AlreadyInMatch(id.clone()));
        }
        let removed = players.remove(id).ok_or_else(|| ArenaError::NotRegistered(id.clone()))?;
        info!("[Registry] Player {} unregistered", id);
        Ok(removed)
    }

    pub fn is_registered(&self, id: &PlayerId) -> bool {
        read(&self.players).contains_key(id)
    }

    pub fn get(&self, id: &PlayerId) -> Option<PlayerInfo> {
        read(&self.players).get(id).cloned()
    }

    /// Flip the in-match flag. Unknown ids are ignored.
    pub fn set_in_match(&self, id: &PlayerId, in_match: bool) {
        if let Some(player) = write(&self.players).get_mut(id) {
            player.in_match = in_match;
            debug!("[Registry] Player {} in_match={}", id, in_match);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_duplicate_id() {
        let registry = PlayerRegistry::new();
        registry.register("A".into(), PlayerMeta::default()).unwrap();
        let err = registry.register("A".into(), PlayerMeta::default()).unwrap_err();
        assert_eq!(err, ArenaError::DuplicateId("A".into()));
        assert!(registry.is_registered(&"A".into()));
    }

    #[test]
    fn test_new_player_is_not_in_match_and_gets_default_username() {
        let registry = PlayerRegistry::new();
        let info = registry.register("42".into(), PlayerMeta { username: None, port: Some(6000) }).unwrap();
        assert!(!info.in_match);
        assert_eq!(info.username, "Player_42");
        assert_eq!(info.port, Some(6000));
    }

    #[test]
    fn test_set_in_match_toggles_and_ignores_unknown() {
        let registry = PlayerRegistry::new();
        registry.register("A".into(), PlayerMeta::default()).unwrap();
        registry.set_in_match(&"A".into(), true);
        assert!(registry.get(&"A".into()).unwrap().in_match);
        registry.set_in_match(&"ghost".into(), true);
        assert!(registry.get(&"ghost".into()).is_none());
    }

    #[test]
    fn test_unregister_refuses_players_in_a_match() {
        let registry = PlayerRegistry::new();
        registry.register("A".into(), PlayerMeta::default()).unwrap();
        registry.set_in_match(&"A".into(), true);
        assert_eq!(registry.unregister(&"A".into()).unwrap_err(), ArenaError::AlreadyInMatch("A".into()));
        registry.set_in_match(&"A".into(), false);
        registry.unregister(&"A".into()).unwrap();
        assert!(!registry.is_registered(&"A".into()));
        assert_eq!(registry.unregister(&"A".into()).unwrap_err(), ArenaError::NotRegistered("A".into()));
    }
}
