/// Matchmaking module: player registration and waiting-pool pairing.

pub mod registry;
pub mod types;
pub mod waiting_pool;

pub use registry::PlayerRegistry;
pub use waiting_pool::WaitingPool;
