//! Cheatsheet HTTP handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use vocab_core::{Cheatsheet, CheatsheetSummary, CreateCheatsheetRequest};

use crate::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct DeletedCheatsheet {
    pub id: i64,
}

/// Create a cheatsheet from a set of word ids.
///
/// # Returns
/// - 201 Created with the summary
/// - 400 Bad Request for a blank title, no ids, or an id with no word
pub async fn create_cheatsheet(
    State(state): State<AppState>,
    payload: Result<Json<CreateCheatsheetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CheatsheetSummary>), ApiError> {
    let Json(req) = payload?;
    let summary = state.repos.cheatsheets.create(req).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// List cheatsheets, newest first.
pub async fn list_cheatsheets(
    State(state): State<AppState>,
) -> Result<Json<Vec<CheatsheetSummary>>, ApiError> {
    Ok(Json(state.repos.cheatsheets.list().await?))
}

/// Get a cheatsheet with its words.
///
/// # Returns
/// - 200 OK with the cheatsheet and its words
/// - 404 Not Found if the cheatsheet doesn't exist
pub async fn get_cheatsheet(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Cheatsheet>, ApiError> {
    let Path(id) = path?;
    state
        .repos
        .cheatsheets
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Cheatsheet not found".to_string()))
}

pub async fn delete_cheatsheet(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedCheatsheet>, ApiError> {
    let Path(id) = path?;
    if !state.repos.cheatsheets.delete(id).await? {
        return Err(ApiError::NotFound("Cheatsheet not found".to_string()));
    }
    Ok(Json(DeletedCheatsheet { id }))
}
