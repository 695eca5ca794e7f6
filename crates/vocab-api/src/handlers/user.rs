//! User-level handlers: sync, statistics and settings.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use vocab_core::{defaults, ProgressSeries, Settings, UpdateSettingsRequest, UserStats};

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncBody {
    pub known_words: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub synced_words: usize,
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageBody {
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    pub language: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataResponse {
    pub target_language: String,
    pub known_words: Vec<String>,
}

/// Mirror the client's known-word set into the store.
///
/// # Returns
/// - 200 OK with `{syncedWords}`
/// - 400 Bad Request if `knownWords` is missing
pub async fn sync_known_words(
    State(state): State<AppState>,
    payload: Result<Json<SyncBody>, JsonRejection>,
) -> Result<Json<SyncResponse>, ApiError> {
    let Json(body) = payload?;
    let words = body
        .known_words
        .ok_or_else(|| ApiError::BadRequest("Known words array is required".to_string()))?;

    let settings = state.repos.settings.get().await?;
    let synced_words = state.intake.sync_known_words(&settings, &words).await?;
    Ok(Json(SyncResponse { synced_words }))
}

/// Headline counts for the dashboard.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<UserStats>, ApiError> {
    Ok(Json(state.stats.stats(&Local, Utc::now()).await?))
}

/// Cumulative Known/Learning series over the trailing `days` (default 7).
///
/// # Returns
/// - 200 OK with `{labels, known, learning}`
/// - 400 Bad Request if `days` is outside 1..=90
pub async fn get_progress(
    State(state): State<AppState>,
    query: Result<Query<ProgressQuery>, QueryRejection>,
) -> Result<Json<ProgressSeries>, ApiError> {
    let Query(query) = query?;
    let days = query.days.unwrap_or(defaults::PROGRESS_DAYS);
    Ok(Json(state.stats.progress(&Local, Utc::now(), days).await?))
}

pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    Ok(Json(state.repos.settings.get().await?))
}

/// Partially update settings.
///
/// # Returns
/// - 200 OK with the full settings record
/// - 400 Bad Request for a blank language or an out-of-range `min_word_length`
pub async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Result<Json<Settings>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.repos.settings.update(req).await?))
}

/// Set the target language.
pub async fn set_language(
    State(state): State<AppState>,
    payload: Result<Json<LanguageBody>, JsonRejection>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let Json(body) = payload?;
    let settings = state
        .repos
        .settings
        .update(UpdateSettingsRequest {
            target_language: Some(body.language),
            min_word_length: None,
        })
        .await?;
    Ok(Json(LanguageResponse {
        language: settings.target_language,
    }))
}

/// Target language plus every Known word, for seeding the client's mirror.
pub async fn get_user_data(
    State(state): State<AppState>,
) -> Result<Json<UserDataResponse>, ApiError> {
    let settings = state.repos.settings.get().await?;
    let known_words = state.repos.words.known_texts().await?;
    Ok(Json(UserDataResponse {
        target_language: settings.target_language,
        known_words,
    }))
}
