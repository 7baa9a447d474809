//! Ring endpoints: enter, inspect, clear, fight

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use ringside_core::{BoxerId, RingsideError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

/// Enter request: a boxer by id or by name
#[derive(Deserialize)]
pub struct EnterRequest {
    pub id: Option<BoxerId>,
    pub name: Option<String>,
}

pub async fn enter_ring(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<EnterRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload?;
    let ring_state = match (req.id, req.name.as_deref()) {
        (Some(id), _) => state.arena.enter_ring(id)?,
        (None, Some(name)) => state.arena.enter_ring_by_name(name)?,
        (None, None) => {
            return Err(RingsideError::Validation {
                field: "boxer",
                message: "request must carry an 'id' or a 'name'".to_string(),
            }
            .into())
        }
    };

    Ok(Json(json!({
        "status": "success",
        "ring_state": ring_state,
        "boxers": state.arena.ring_boxers(),
    })))
}

/// Current ring occupants in entry order
pub async fn get_ring_boxers(State(state): State<Arc<ServerState>>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "ring_state": state.arena.ring_state(),
        "boxers": state.arena.ring_boxers(),
    }))
}

pub async fn clear_ring(State(state): State<Arc<ServerState>>) -> Json<Value> {
    state.arena.clear_ring();
    Json(json!({
        "status": "success",
        "message": "Ring cleared",
    }))
}

/// Resolve the bout between the two boxers in the ring
pub async fn fight(State(state): State<Arc<ServerState>>) -> Result<Json<Value>, ApiError> {
    let result = state.arena.fight()?;
    state.persist().await;

    Ok(Json(json!({
        "status": "success",
        "winner": result.winner.name,
        "winner_id": result.winner.id,
        "loser_id": result.loser.id,
        "probability_a": result.decision.probability_a,
        "draw": result.decision.draw,
    })))
}
