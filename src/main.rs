//! Main entry point for the backend server.
//!
//! Initializes logging, creates the shared arena state, and launches the HTTP server
//! exposing the matchmaking and move-submission RPC routes.

use actix_web::{web, App, HttpServer};
use log::info;

use config::ArenaConfig;
use config::server::{BIND_ADDR, PORT};

pub mod config;
mod game;
mod server;


#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    // Shared application state for HTTP handlers.
    let state = web::Data::new(server::state::AppState::new(ArenaConfig::default()));

    let config = state.coordinator.config();
    info!(
        "[Server] Listening on {}:{} (best of {}, {} wins to take a match)",
        BIND_ADDR, PORT, config.max_rounds, config.win_threshold()
    );

    // Start the HTTP server with the RPC routes.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((BIND_ADDR, PORT))?
    .run()
    .await
}
