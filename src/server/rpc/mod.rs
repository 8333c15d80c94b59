/// JSON RPC surface over HTTP: request DTOs, the reply envelope and route handlers.

pub mod handlers;
pub mod messages;
