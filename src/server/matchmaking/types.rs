use serde::{Serialize, Deserialize};

use crate::game::types::PlayerId;

/// Optional metadata a client sends when registering.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct PlayerMeta {
    #[serde(default)]
    pub username: Option<String>,
    /// Port the client listens on, kept for clients that expect call-backs.
    #[serde(default)]
    pub port: Option<u16>,
}

/// A registered player as tracked by the registry.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub username: String,
    pub port: Option<u16>,
    pub in_match: bool,
}

impl PlayerInfo {
    /// Build a fresh, not-yet-paired player. Missing usernames default to the id.
    pub fn new(id: PlayerId, meta: PlayerMeta) -> Self {
        let username = meta
            .username
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("Player_{}", id));
        Self {
            id,
            username,
            port: meta.port,
            in_match: false,
        }
    }
}
