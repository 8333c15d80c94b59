//! HTTP routing configuration.
//!
//! Maps every RPC procedure onto a route. Extractor failures (malformed JSON, non-numeric
//! match ids, missing query parameters) are answered with the same reply envelope.

use actix_web::{error, http::StatusCode, web, HttpRequest};
use log::warn;

use crate::server::rpc::handlers;
use crate::server::rpc::messages::http_error_response;

/// Configure the application's routes and extractor error handling.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| bad_request(err, req)))
        .app_data(web::PathConfig::default().error_handler(|err, req| bad_request(err, req)))
        .app_data(web::QueryConfig::default().error_handler(|err, req| bad_request(err, req)))
        .route("/methods", web::get().to(handlers::list_methods))
        .route("/players", web::post().to(handlers::register))
        .route("/players/{player_id}", web::get().to(handlers::get_player))
        .route("/players/{player_id}", web::delete().to(handlers::unregister))
        .route("/pool/join", web::post().to(handlers::join_pool))
        .route("/pool/leave", web::post().to(handlers::leave_pool))
        .route("/matches/find", web::post().to(handlers::find_match))
        .route("/matches/{match_id}", web::get().to(handlers::get_match_status))
        .route("/matches/{match_id}/moves", web::post().to(handlers::submit_move))
        .route("/matches/{match_id}/opponent", web::get().to(handlers::get_opponent))
        .route("/matches/{match_id}/turn", web::get().to(handlers::get_current_turn))
        .route("/matches/{match_id}/scores", web::get().to(handlers::get_scores))
        .route("/matches/{match_id}/forfeit", web::post().to(handlers::forfeit));
}

fn bad_request(err: impl std::fmt::Display + std::fmt::Debug + 'static, req: &HttpRequest) -> error::Error {
    let message = err.to_string();
    warn!("[Rpc] Bad request on {}: {}", req.path(), message);
    let response = http_error_response("BAD_REQUEST", &message, StatusCode::BAD_REQUEST);
    error::InternalError::from_response(err, response).into()
}
