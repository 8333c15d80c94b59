//! Route handlers. Each one maps a single call onto the coordinator and wraps the result in
//! the reply envelope.

use actix_web::{web, HttpResponse};
use log::debug;
use serde_json::Value;

use super::messages::{MoveRequest, PlayerRequest, PlayerView, RegisterRequest, RpcReply, METHODS};
use crate::config::matchmaking::WAITING_MESSAGE;
use crate::game::types::{MatchId, PlayerId};
use crate::server::coordinator::FindOutcome;
use crate::server::error::ArenaError;
use crate::server::state::AppState;

pub async fn register(data: web::Data<AppState>, body: web::Json<RegisterRequest>) -> HttpResponse {
    let RegisterRequest { player_id, meta } = body.into_inner();
    debug!("[Rpc] register {}", player_id);
    let result = data
        .coordinator
        .register(player_id, meta)
        .map(|info| format!("Player {} registered", info.id));
    RpcReply::from_result(result).into_response()
}

pub async fn unregister(data: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let player_id = PlayerId::new(path.into_inner());
    let result = data
        .coordinator
        .unregister(&player_id)
        .map(|info| format!("Player {} unregistered", info.id));
    RpcReply::from_result(result).into_response()
}

pub async fn get_player(data: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let player_id = PlayerId::new(path.into_inner());
    let coordinator = &data.coordinator;
    let result = coordinator
        .player(&player_id)
        .map(|info| PlayerView {
            info,
            match_id: coordinator.match_of(&player_id),
            waiting_position: coordinator.waiting_position(&player_id),
        })
        .ok_or(ArenaError::NotRegistered(player_id));
    RpcReply::from_result(result).into_response()
}

pub async fn join_pool(data: web::Data<AppState>, body: web::Json<PlayerRequest>) -> HttpResponse {
    let player_id = body.into_inner().player_id;
    let result = data
        .coordinator
        .join_waiting_pool(&player_id)
        .map(|joined| {
            let prefix = if joined.newly_added { WAITING_MESSAGE } else { "Already waiting" };
            format!("{} (position {})", prefix, joined.position + 1)
        });
    RpcReply::from_result(result).into_response()
}

pub async fn leave_pool(data: web::Data<AppState>, body: web::Json<PlayerRequest>) -> HttpResponse {
    let player_id = body.into_inner().player_id;
    let result = data
        .coordinator
        .leave_waiting_pool(&player_id)
        .map(|()| format!("Player {} left the waiting pool", player_id));
    RpcReply::from_result(result).into_response()
}

/// Payload is the match id once paired, otherwise a waiting message.
pub async fn find_match(data: web::Data<AppState>, body: web::Json<PlayerRequest>) -> HttpResponse {
    let player_id = body.into_inner().player_id;
    let result = data.coordinator.find_or_create_match(&player_id).map(|outcome| match outcome {
        FindOutcome::Matched { match_id } => Value::from(match_id),
        FindOutcome::Waiting { position: Some(position) } => {
            Value::from(format!("{} (position {})", WAITING_MESSAGE, position + 1))
        }
        FindOutcome::Waiting { position: None } => Value::from(WAITING_MESSAGE),
    });
    RpcReply::from_result(result).into_response()
}

pub async fn submit_move(
    data: web::Data<AppState>,
    path: web::Path<MatchId>,
    body: web::Json<MoveRequest>,
) -> HttpResponse {
    let match_id = path.into_inner();
    let MoveRequest { player_id, choice } = body.into_inner();
    let result = data
        .coordinator
        .submit_move(&player_id, match_id, &choice)
        .map(|outcome| outcome.message());
    RpcReply::from_result(result).into_response()
}

pub async fn get_opponent(
    data: web::Data<AppState>,
    path: web::Path<MatchId>,
    query: web::Query<PlayerRequest>,
) -> HttpResponse {
    let result = data.coordinator.opponent_id(&query.player_id, path.into_inner());
    RpcReply::from_result(result).into_response()
}

/// `ok` is false and the payload null when the match does not exist.
pub async fn get_current_turn(data: web::Data<AppState>, path: web::Path<MatchId>) -> HttpResponse {
    let reply = match data.coordinator.current_turn(path.into_inner()) {
        Some(player_id) => RpcReply::success(player_id.as_str()),
        None => RpcReply { ok: false, payload: Value::Null, code: None },
    };
    reply.into_response()
}

pub async fn get_scores(data: web::Data<AppState>, path: web::Path<MatchId>) -> HttpResponse {
    RpcReply::from_result(data.coordinator.score_snapshot(path.into_inner())).into_response()
}

pub async fn get_match_status(data: web::Data<AppState>, path: web::Path<MatchId>) -> HttpResponse {
    RpcReply::from_result(data.coordinator.match_status(path.into_inner())).into_response()
}

pub async fn forfeit(
    data: web::Data<AppState>,
    path: web::Path<MatchId>,
    body: web::Json<PlayerRequest>,
) -> HttpResponse {
    let player_id = body.into_inner().player_id;
    let result = data
        .coordinator
        .forfeit_match(&player_id, path.into_inner())
        .map(|outcome| {
            format!(
                "{} forfeited match {}, {} wins",
                outcome.forfeited_by, outcome.match_id, outcome.winner
            )
        });
    RpcReply::from_result(result).into_response()
}

pub async fn list_methods() -> HttpResponse {
    RpcReply::success(METHODS.to_vec()).into_response()
}
