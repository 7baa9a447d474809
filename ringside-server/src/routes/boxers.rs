//! Registry endpoints: create, delete, look up, list

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use ringside_core::{BoxerId, LeaderboardEntry, NewBoxer};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

/// Register a boxer
pub async fn create_boxer(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<NewBoxer>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(req) = payload?;
    let boxer = state.arena.create_boxer(req)?;
    state.persist().await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "boxer": LeaderboardEntry::from(boxer),
        })),
    ))
}

/// Delete a boxer (and drop it from the ring)
pub async fn delete_boxer(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<BoxerId>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let boxer = state.arena.delete_boxer(id)?;
    state.persist().await;

    Ok(Json(json!({
        "status": "success",
        "message": format!("Boxer with ID {} deleted", boxer.id),
    })))
}

pub async fn get_boxer_by_id(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<BoxerId>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let boxer = state.arena.get_boxer(id)?;
    Ok(Json(json!({
        "status": "success",
        "boxer": LeaderboardEntry::from(boxer),
    })))
}

pub async fn get_boxer_by_name(
    State(state): State<Arc<ServerState>>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(name) = name?;
    let boxer = state.arena.get_boxer_by_name(&name)?;
    Ok(Json(json!({
        "status": "success",
        "boxer": LeaderboardEntry::from(boxer),
    })))
}

/// All boxers in creation order
pub async fn list_boxers(State(state): State<Arc<ServerState>>) -> Json<Value> {
    let boxers: Vec<LeaderboardEntry> = state
        .arena
        .list_boxers()
        .into_iter()
        .map(LeaderboardEntry::from)
        .collect();
    Json(json!({ "status": "success", "boxers": boxers }))
}
