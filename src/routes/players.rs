use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::db::search::PlayerSearch;
use crate::db::{self, Row};
use crate::error::ApiError;
use crate::models::{MessageResponse, PlayerCreatedResponse, PlayerInput, SearchQuery, TransferInput};
use crate::AppState;

// GET /players - Rows from the roster view
pub async fn get_players(State(state): State<AppState>) -> Result<Json<Vec<Row>>, ApiError> {
    let players = db::players::get_all_players(state.db.as_ref())
        .await
        .map_err(ApiError::database("Failed to fetch players"))?;

    Ok(Json(players))
}

// GET /players/:id - Editable fields, dob as YYYY-MM-DD
pub async fn get_player_by_id(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<Row>, ApiError> {
    let player = db::players::get_player_by_id(state.db.as_ref(), player_id)
        .await
        .map_err(ApiError::database("Failed to fetch player details"))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(player))
}

// POST /players - Age and other constraints are enforced by the database
pub async fn create_player(
    State(state): State<AppState>,
    payload: Result<Json<PlayerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PlayerCreatedResponse>), ApiError> {
    let Json(input) = payload?;

    let outcome = db::players::insert_player(state.db.as_ref(), &input)
        .await
        .map_err(ApiError::rejected("Failed to create player"))?;

    tracing::info!("Created player {}", outcome.last_insert_id);

    Ok((
        StatusCode::CREATED,
        Json(PlayerCreatedResponse {
            message: "Player created successfully".to_string(),
            player_id: outcome.last_insert_id,
        }),
    ))
}

// PUT /players/:id
pub async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
    payload: Result<Json<PlayerInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(input) = payload?;

    db::players::update_player(state.db.as_ref(), player_id, &input)
        .await
        .map_err(ApiError::rejected("Failed to update player"))?;

    Ok(Json(MessageResponse::new("Player updated successfully")))
}

// DELETE /players/:id
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    db::players::delete_player(state.db.as_ref(), player_id)
        .await
        .map_err(ApiError::database("Failed to delete player"))?;

    Ok(Json(MessageResponse::new("Player deleted successfully")))
}

// GET /players/search?name=Leo&nameMatchType=startsWith&minAge=20 - Scouting search
pub async fn search_players(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let search = PlayerSearch::try_from(params)?;

    let players = db::players::search_players(state.db.as_ref(), &search)
        .await
        .map_err(ApiError::database("Failed to search players"))?;

    Ok(Json(players))
}

// POST /players/:id/transfer - Runs the transfer_player procedure
pub async fn transfer_player(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
    payload: Result<Json<TransferInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(input) = payload?;

    db::players::transfer_player(state.db.as_ref(), player_id, &input)
        .await
        .map_err(ApiError::database("Failed to execute transfer"))?;

    tracing::info!("Transferred player {} to club {:?}", player_id, input.new_club_id);

    Ok(Json(MessageResponse::new("Blockbuster Transfer Completed Successfully!")))
}

// GET /players/:id/transfers
pub async fn get_player_transfer_history(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let history = db::players::get_transfer_history(state.db.as_ref(), player_id)
        .await
        .map_err(ApiError::database("Failed to fetch transfer history"))?;

    Ok(Json(history))
}
