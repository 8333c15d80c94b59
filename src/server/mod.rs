// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Player registration and waiting-pool pairing (matchmaking)
//! - Per-match state, turn gating and round resolution (game_session)
//! - The coordinator that callers go through for every action
//! - Application state and HTTP routing for the JSON RPC surface

pub mod coordinator;
pub mod error;
pub mod game_session;
pub mod matchmaking;
pub mod router;
pub mod rpc;
pub mod state;
pub mod sync_utils;
