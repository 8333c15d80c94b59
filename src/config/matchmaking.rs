/// Matchmaking configuration constants.
/// 
/// This module defines parameters for the waiting pool and pairing.
pub const PLAYERS_PER_MATCH: usize = 2; // A match is always a head-to-head contest.

/// Message returned while a player is still waiting to be paired.
pub const WAITING_MESSAGE: &str = "Waiting for an opponent";
