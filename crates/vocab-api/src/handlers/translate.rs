use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBody {
    #[serde(default)]
    pub word: String,
    pub target_lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub word: String,
    pub translation: String,
    pub language: String,
}

/// Translate one word without storing it.
///
/// Translator failures and timeouts degrade to a placeholder.
///
/// # Returns
/// - 200 OK with `{word, translation, language}`
/// - 400 Bad Request if `word` is blank
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(body) = payload?;
    let settings = state.repos.settings.get().await?;
    let result = state
        .intake
        .translate(&settings, &body.word, body.target_lang.as_deref())
        .await?;
    Ok(Json(TranslateResponse {
        word: result.word,
        translation: result.translation,
        language: result.language,
    }))
}
