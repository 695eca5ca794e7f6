//! Core traits for vocab abstractions.
//!
//! These traits define the interfaces that concrete stores and lookup
//! backends must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::*;

// =============================================================================
// WORD REPOSITORY
// =============================================================================

/// Repository for vocabulary entries.
///
/// Text lookups are case-insensitive; `text` is unique modulo case.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Case-insensitive lookup by text.
    async fn find_by_text(&self, text: &str) -> Result<Option<WordEntry>>;

    /// Fetch an entry by id.
    async fn get(&self, id: i64) -> Result<Option<WordEntry>>;

    /// Insert unless an entry with the same case-folded text exists.
    ///
    /// This is the per-word serialization point for every intake path: of
    /// two concurrent calls for the same word exactly one observes `Created`.
    async fn insert_if_absent(&self, req: CreateWordRequest) -> Result<InsertOutcome>;

    /// Set the category, returning the updated entry.
    async fn set_category(&self, id: i64, category: Category) -> Result<WordEntry>;

    /// Overwrite the context snippet, returning the updated entry.
    async fn set_context(&self, id: i64, context: Option<&str>) -> Result<WordEntry>;

    /// Flip Known <-> Learning in one step, returning the new category.
    async fn toggle_category(&self, id: i64) -> Result<Category>;

    /// Delete an entry. Returns false if nothing had that id.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Filtered, sorted, offset-paginated listing.
    async fn list(&self, req: &ListWordsRequest) -> Result<ListWordsResponse>;

    /// Most recently added entries, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<WordEntry>>;

    /// Entry counts grouped by part of speech (None = unclassified).
    async fn part_of_speech_counts(&self) -> Result<Vec<PartOfSpeechCount>>;

    /// Category counts over entries added strictly before `cutoff`
    /// (all entries when `None`).
    async fn category_counts(&self, cutoff: Option<DateTime<Utc>>) -> Result<CategoryCounts>;

    /// Number of entries added at or after `since`.
    async fn count_added_since(&self, since: DateTime<Utc>) -> Result<i64>;

    /// Texts of every Known entry.
    async fn known_texts(&self) -> Result<Vec<String>>;
}

// =============================================================================
// SETTINGS / PAGE VISITS
// =============================================================================

/// Repository for the singleton settings record.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Read the settings row, creating it with defaults if absent.
    async fn get(&self) -> Result<Settings>;

    /// Apply a validated partial update in place.
    async fn update(&self, req: UpdateSettingsRequest) -> Result<Settings>;
}

/// Append-only log of scanned pages.
#[async_trait]
pub trait PageVisitRepository: Send + Sync {
    async fn record(&self, url: &str, title: Option<&str>) -> Result<()>;

    async fn count(&self) -> Result<i64>;
}

// =============================================================================
// CHEATSHEETS
// =============================================================================

/// Repository for cheatsheets and their word memberships.
#[async_trait]
pub trait CheatsheetRepository: Send + Sync {
    /// Create a cheatsheet and all memberships atomically.
    ///
    /// A word id that does not exist fails the whole call with
    /// `InvalidInput` and leaves nothing behind.
    async fn create(&self, req: CreateCheatsheetRequest) -> Result<CheatsheetSummary>;

    /// All cheatsheets, newest first.
    async fn list(&self) -> Result<Vec<CheatsheetSummary>>;

    /// A cheatsheet with its words embedded.
    async fn get(&self, id: i64) -> Result<Option<Cheatsheet>>;

    /// Delete a cheatsheet. Returns false if nothing had that id.
    async fn delete(&self, id: i64) -> Result<bool>;
}

// =============================================================================
// LOOKUP CAPABILITIES
// =============================================================================

/// Translates a word into a target language.
///
/// Implementations may be networked; callers bound each call with a timeout
/// and substitute [`placeholder_translation`] on error.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, word: &str, language: &str) -> Result<String>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Assigns an optional part-of-speech label to a word.
pub trait PartOfSpeechClassifier: Send + Sync {
    fn classify(&self, word: &str) -> Option<PartOfSpeech>;
}

/// Deterministic stand-in used when no translation is available.
pub fn placeholder_translation(word: &str, language: &str) -> String {
    format!("[{} in {}]", word, language)
}
