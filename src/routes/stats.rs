use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::config::DbConfig;
use crate::db;
use crate::error::ApiError;
use crate::models::GameStat;

// GET /api/stats - all play counts, ordered by game name
pub async fn get_stats(
    State(config): State<DbConfig>,
) -> Result<Json<Vec<GameStat>>, ApiError> {
    let stats = db::fetch_stats(&config)
        .await
        .map_err(ApiError::FetchStats)?;

    Ok(Json(stats))
}

// POST /api/play/{game} - increment a game's play count
pub async fn play_game(
    State(config): State<DbConfig>,
    Path(game): Path<String>,
) -> Result<Json<GameStat>, ApiError> {
    // Game names are stored uppercase; the path segment is case-insensitive.
    let game_name = game.to_uppercase();

    let updated = db::increment_play_count(&config, &game_name)
        .await
        .map_err(ApiError::UpdatePlayCount)?
        .ok_or(ApiError::GameNotFound)?;

    Ok(Json(updated))
}
