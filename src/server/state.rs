// src/server/state.rs

//! Application state for the RPC server.
//!
//! Holds the match coordinator shared by every HTTP handler.

use crate::config::ArenaConfig;
use crate::server::coordinator::MatchCoordinator;

/// Shared application state, injected into HTTP handlers.
pub struct AppState {
    /// Owner of all players, the waiting pool and active matches.
    pub coordinator: MatchCoordinator,
}

impl AppState {
    /// Create a new AppState with an empty arena.
    pub fn new(config: ArenaConfig) -> Self {
        AppState {
            coordinator: MatchCoordinator::new(config),
        }
    }
}
