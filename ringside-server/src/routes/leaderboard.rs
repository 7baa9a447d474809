//! Leaderboard endpoint

use axum::extract::{rejection::QueryRejection, Query, State};
use axum::Json;
use ringside_core::SortBy;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

/// Query params
#[derive(Deserialize)]
pub struct LeaderboardParams {
    pub sort: Option<String>,
}

/// Leaderboard sorted by `wins` (default) or `win_pct`
pub async fn get_leaderboard(
    State(state): State<Arc<ServerState>>,
    params: Result<Query<LeaderboardParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    let sort_by = match params.sort.as_deref() {
        Some(s) => s.parse::<SortBy>()?,
        None => SortBy::default(),
    };

    Ok(Json(json!({
        "status": "success",
        "sort": sort_by,
        "leaderboard": state.arena.leaderboard(sort_by),
    })))
}
