/// Main configuration module.
/// 
/// Re-exports submodules for game, matchmaking and server configuration.
pub mod matchmaking;
pub mod game;
pub mod server;

pub use game::ArenaConfig;
