//! Word intake and vocabulary query handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use vocab_core::{
    defaults, Category, CategoryBreakdown, CategoryFilter, Error, ListWordsRequest,
    ListWordsResponse, PartOfSpeechFilter, WordEntry, WordSort,
};

use crate::services::PageRef;
use crate::{ApiError, AppState};

/// Request body for batch processing.
#[derive(Debug, Deserialize)]
pub struct ProcessWordsBody {
    pub words: Option<Vec<String>>,
    /// Overrides the configured target language for this batch.
    pub language: Option<String>,
    /// Page the words were scanned from; recorded as a visit.
    pub url: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessWordsResponse {
    pub known_words: Vec<String>,
    pub new_words: Vec<WordEntry>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct WordBody {
    #[serde(default)]
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    #[serde(default)]
    pub word: String,
    pub translation: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WordResponse {
    pub word: WordEntry,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: i64,
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: i64,
}

/// Query parameters for listing words.
#[derive(Debug, Default, Deserialize)]
pub struct ListWordsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// `all`, `known` or `learning`
    pub filter: Option<String>,
    /// Part-of-speech label, `Other` for unclassified, or `all`
    pub category: Option<String>,
    /// `date-desc`, `date-asc`, `alpha-asc` or `alpha-desc`
    pub sort: Option<String>,
}

impl ListWordsQuery {
    fn into_request(self) -> Result<ListWordsRequest, Error> {
        let req = ListWordsRequest {
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(defaults::PAGE_LIMIT),
            category: CategoryFilter::parse(self.filter.as_deref()),
            part_of_speech: PartOfSpeechFilter::parse(self.category.as_deref())?,
            sort: WordSort::parse(self.sort.as_deref()),
        };
        req.validate()?;
        Ok(req)
    }
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

/// Reconcile a batch of words scanned from a page.
///
/// # Returns
/// - 200 OK with `{knownWords, newWords, total}`
/// - 400 Bad Request if `words` is missing
pub async fn process_words(
    State(state): State<AppState>,
    payload: Result<Json<ProcessWordsBody>, JsonRejection>,
) -> Result<Json<ProcessWordsResponse>, ApiError> {
    let Json(body) = payload?;
    let words = body
        .words
        .ok_or_else(|| ApiError::BadRequest("Words array is required".to_string()))?;

    let settings = state.repos.settings.get().await?;
    let page = body.url.map(|url| PageRef {
        url,
        title: body.title,
    });

    let outcome = state
        .intake
        .process_batch(&settings, &words, body.language.as_deref(), page)
        .await?;

    let total = outcome.total();
    Ok(Json(ProcessWordsResponse {
        known_words: outcome.known_words,
        new_words: outcome.new_words,
        total,
    }))
}

/// Mark a word as known, creating it if needed.
///
/// # Returns
/// - 200 OK with the stored entry
/// - 400 Bad Request if `word` is blank
pub async fn mark_known(
    State(state): State<AppState>,
    payload: Result<Json<WordBody>, JsonRejection>,
) -> Result<Json<WordResponse>, ApiError> {
    let Json(body) = payload?;
    let settings = state.repos.settings.get().await?;
    let word = state.intake.mark_known(&settings, &body.word).await?;
    Ok(Json(WordResponse { word }))
}

/// Queue a word for review.
///
/// # Returns
/// - 200 OK with the stored entry
/// - 400 Bad Request if `word` is blank
pub async fn add_for_review(
    State(state): State<AppState>,
    payload: Result<Json<ReviewBody>, JsonRejection>,
) -> Result<Json<WordResponse>, ApiError> {
    let Json(body) = payload?;
    let settings = state.repos.settings.get().await?;
    let word = state
        .intake
        .add_for_review(&settings, &body.word, body.translation, body.context)
        .await?;
    Ok(Json(WordResponse { word }))
}

/// Flip a word between Known and Learning.
///
/// # Returns
/// - 200 OK with `{id, category}`
/// - 404 Not Found if the word doesn't exist
pub async fn toggle_status(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let Path(id) = path?;
    let category = state.intake.toggle_status(id).await?;
    Ok(Json(ToggleResponse { id, category }))
}

/// Delete a word and its cheatsheet memberships.
///
/// # Returns
/// - 200 OK with `{id}`
/// - 404 Not Found if the word doesn't exist
pub async fn delete_word(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = path?;
    if !state.repos.words.delete(id).await? {
        return Err(ApiError::NotFound("Word not found".to_string()));
    }
    Ok(Json(DeletedResponse { id }))
}

/// List words with pagination, filters and sort.
///
/// # Returns
/// - 200 OK with `{words, total, page, limit}`
/// - 400 Bad Request for an invalid page, limit or part-of-speech label
pub async fn list_words(
    State(state): State<AppState>,
    query: Result<Query<ListWordsQuery>, QueryRejection>,
) -> Result<Json<ListWordsResponse>, ApiError> {
    let Query(query) = query?;
    let req = query.into_request()?;
    Ok(Json(state.repos.words.list(&req).await?))
}

/// Most recently added words.
pub async fn recent_words(
    State(state): State<AppState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<Vec<WordEntry>>, ApiError> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(defaults::RECENT_LIMIT);
    if !(1..=defaults::PAGE_LIMIT_MAX).contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {}",
            defaults::PAGE_LIMIT_MAX
        )));
    }
    Ok(Json(state.repos.words.recent(limit).await?))
}

/// Word counts per part of speech, including `"Other"`.
pub async fn category_breakdown(
    State(state): State<AppState>,
) -> Result<Json<CategoryBreakdown>, ApiError> {
    Ok(Json(state.stats.category_breakdown().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::PartOfSpeech;

    #[test]
    fn test_list_query_defaults() {
        let req = ListWordsQuery::default().into_request().unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, defaults::PAGE_LIMIT);
        assert_eq!(req.category, CategoryFilter::All);
        assert_eq!(req.sort, WordSort::DateDesc);
    }

    #[test]
    fn test_list_query_maps_filter_and_category() {
        let req = ListWordsQuery {
            filter: Some("known".into()),
            category: Some("Verb".into()),
            sort: Some("alpha-asc".into()),
            ..Default::default()
        }
        .into_request()
        .unwrap();
        assert_eq!(req.category, CategoryFilter::Only(Category::Known));
        assert_eq!(req.part_of_speech, PartOfSpeechFilter::Label(PartOfSpeech::Verb));
        assert_eq!(req.sort, WordSort::AlphaAsc);
    }

    #[test]
    fn test_list_query_rejects_bad_paging() {
        let zero_page = ListWordsQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(zero_page.into_request().is_err());

        let huge = ListWordsQuery {
            limit: Some(defaults::PAGE_LIMIT_MAX + 1),
            ..Default::default()
        };
        assert!(huge.into_request().is_err());
    }
}
