/// RPC server configuration constants.
///
/// The server listens on a fixed address; argument parsing is left to whoever deploys it.
pub const BIND_ADDR: &str = "127.0.0.1";

/// Port of the RPC server.
pub const PORT: u16 = 5000;
