use actix_web::{HttpResponse, http::StatusCode};
use serde::{Serialize, Deserialize};
use serde_json::Value;
use log::error;

use crate::game::types::{MatchId, PlayerId};
use crate::server::error::{ArenaError, ArenaResult};
use crate::server::matchmaking::types::{PlayerInfo, PlayerMeta};

/// Procedures exposed by the server, as reported by `GET /methods`.
pub const METHODS: [&str; 13] = [
    "register",
    "unregister",
    "getPlayer",
    "joinWaitingPool",
    "leaveWaitingPool",
    "findMatch",
    "submitMove",
    "getOpponent",
    "getCurrentTurn",
    "getScores",
    "getMatchStatus",
    "forfeit",
    "listMethods",
];

#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub meta: PlayerMeta,
}

/// Body (or query) carrying only the calling player.
#[derive(Deserialize, Debug)]
pub struct PlayerRequest {
    pub player_id: PlayerId,
}

#[derive(Deserialize, Debug)]
pub struct MoveRequest {
    pub player_id: PlayerId,
    pub choice: String,
}

/// Registry entry plus where the player currently stands.
#[derive(Serialize, Debug)]
pub struct PlayerView {
    #[serde(flatten)]
    pub info: PlayerInfo,
    pub match_id: Option<MatchId>,
    /// Zero-based place in the waiting pool.
    pub waiting_position: Option<usize>,
}

/// Uniform reply envelope: success flag plus either the payload or an error message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcReply {
    pub ok: bool,
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl RpcReply {
    pub fn success(payload: impl Into<Value>) -> Self {
        Self { ok: true, payload: payload.into(), code: None }
    }

    /// Error reply with a unique code (e.g. "NOT_YOUR_TURN") and a human-readable message.
    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            payload: Value::String(message.into()),
            code: Some(code.to_string()),
        }
    }

    pub fn from_error(err: &ArenaError) -> Self {
        Self::failure(err.code(), err.to_string())
    }

    /// Serialize a successful result as the payload, or report the error.
    pub fn from_result<T: Serialize>(result: ArenaResult<T>) -> Self {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(payload) => Self::success(payload),
                Err(e) => {
                    error!("[Rpc] Failed to serialize reply payload: {}", e);
                    Self::failure("INTERNAL", "Internal server error")
                }
            },
            Err(err) => Self::from_error(&err),
        }
    }

    /// Domain errors are ordinary replies, so the HTTP status is 200 either way.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// HTTP error response for requests that never reached the coordinator (bad JSON, bad path).
pub fn http_error_response(code: &str, message: &str, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(RpcReply::failure(code, message))
}
