use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::db::{self, Row};
use crate::error::ApiError;
use crate::models::{AppearanceInput, MatchInput, MessageResponse};
use crate::AppState;

const SAME_CLUB: &str = "Home and Away teams must be different.";

// GET /matches - All matches with club and stadium names, newest first
pub async fn get_matches(State(state): State<AppState>) -> Result<Json<Vec<Row>>, ApiError> {
    let matches = db::matches::get_all_matches(state.db.as_ref())
        .await
        .map_err(ApiError::database("Failed to fetch matches"))?;

    Ok(Json(matches))
}

// GET /matches/:id - Raw match fields for the edit form
pub async fn get_match_by_id(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<Row>, ApiError> {
    let row = db::matches::get_match_by_id(state.db.as_ref(), match_id)
        .await
        .map_err(ApiError::database("Failed to fetch match details"))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(row))
}

// POST /matches
pub async fn create_match(
    State(state): State<AppState>,
    payload: Result<Json<MatchInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(input) = payload?;

    if input.same_club() {
        return Err(ApiError::BadRequest(SAME_CLUB.to_string()));
    }

    db::matches::insert_match(state.db.as_ref(), &input)
        .await
        .map_err(ApiError::database("Failed to create match"))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Match created successfully")),
    ))
}

// PUT /matches/:id
pub async fn update_match(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
    payload: Result<Json<MatchInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(input) = payload?;

    if input.same_club() {
        return Err(ApiError::BadRequest(SAME_CLUB.to_string()));
    }

    db::matches::update_match(state.db.as_ref(), match_id, &input)
        .await
        .map_err(ApiError::database("Failed to update match"))?;

    Ok(Json(MessageResponse::new("Match updated successfully")))
}

// DELETE /matches/:id
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    db::matches::delete_match(state.db.as_ref(), match_id)
        .await
        .map_err(ApiError::database("Failed to delete match"))?;

    Ok(Json(MessageResponse::new("Match deleted successfully")))
}

// GET /matches/stadiums
pub async fn get_stadiums(State(state): State<AppState>) -> Result<Json<Vec<Row>>, ApiError> {
    let stadiums = db::matches::get_all_stadiums(state.db.as_ref())
        .await
        .map_err(ApiError::database("Failed to fetch stadiums"))?;

    Ok(Json(stadiums))
}

// GET /matches/:id/lineup
pub async fn get_match_lineup(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let lineup = db::matches::get_match_lineup(state.db.as_ref(), match_id)
        .await
        .map_err(ApiError::database("Failed to fetch lineup"))?;

    Ok(Json(lineup))
}

// POST /matches/:id/lineup
pub async fn add_match_appearance(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
    payload: Result<Json<AppearanceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(input) = payload?;

    db::matches::insert_appearance(state.db.as_ref(), match_id, &input)
        .await
        .map_err(ApiError::database("Failed to add player to lineup."))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Player added to lineup")),
    ))
}
