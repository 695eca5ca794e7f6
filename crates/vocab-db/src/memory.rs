//! In-memory store for tests and database-free development.
//!
//! Implements every repository trait with the same observable semantics as
//! the PostgreSQL repositories: case-insensitive text uniqueness, identity
//! ids that are never reused, cascading membership removal, and all-or-nothing
//! cheatsheet creation.
//!
//! ## Usage
//!
//! ```rust
//! use vocab_db::memory::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let repos = store.repositories();
//! # let _ = repos;
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vocab_core::{
    word_key, Category, CategoryCounts, Cheatsheet, CheatsheetRepository, CheatsheetSummary,
    CreateCheatsheetRequest, CreateWordRequest, Error, InsertOutcome, ListWordsRequest,
    ListWordsResponse, PageVisitRepository, PartOfSpeechCount, Result, Settings,
    SettingsRepository, UpdateSettingsRequest, WordEntry, WordRepository, WordSort,
};

use crate::Repositories;

#[derive(Debug, Clone)]
struct StoredCheatsheet {
    title: String,
    date_created: DateTime<Utc>,
    word_ids: Vec<i64>,
}

#[derive(Debug, Default)]
struct MemoryState {
    words: BTreeMap<i64, WordEntry>,
    next_word_id: i64,
    settings: Option<Settings>,
    page_visits: Vec<(String, Option<String>)>,
    fail_page_visits: bool,
    cheatsheets: BTreeMap<i64, StoredCheatsheet>,
    next_cheatsheet_id: i64,
}

impl MemoryState {
    fn find_by_key(&self, text: &str) -> Option<&WordEntry> {
        let key = word_key(text);
        self.words.values().find(|w| word_key(&w.text) == key)
    }

    fn word_mut(&mut self, id: i64) -> Result<&mut WordEntry> {
        self.words.get_mut(&id).ok_or(Error::WordNotFound(id))
    }
}

/// Shared, cloneable in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle this store behind every repository trait.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            words: Arc::new(self.clone()),
            settings: Arc::new(self.clone()),
            page_visits: Arc::new(self.clone()),
            cheatsheets: Arc::new(self.clone()),
        }
    }

    /// Rewrite an entry's `date_added` (for date-sensitive tests).
    pub fn backdate(&self, id: i64, date_added: DateTime<Utc>) -> Result<()> {
        self.state().word_mut(id)?.date_added = date_added;
        Ok(())
    }

    /// Make subsequent page-visit writes fail.
    pub fn fail_page_visits(&self, fail: bool) {
        self.state().fail_page_visits = fail;
    }

    /// Number of stored word entries.
    pub fn word_count(&self) -> usize {
        self.state().words.len()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl WordRepository for MemoryStore {
    async fn find_by_text(&self, text: &str) -> Result<Option<WordEntry>> {
        Ok(self.state().find_by_key(text).cloned())
    }

    async fn get(&self, id: i64) -> Result<Option<WordEntry>> {
        Ok(self.state().words.get(&id).cloned())
    }

    async fn insert_if_absent(&self, req: CreateWordRequest) -> Result<InsertOutcome> {
        let text = req.text.trim();
        if text.is_empty() {
            return Err(Error::InvalidInput("Word is required".into()));
        }

        let mut state = self.state();
        if let Some(existing) = state.find_by_key(text) {
            return Ok(InsertOutcome::Existing(existing.clone()));
        }

        state.next_word_id += 1;
        let entry = WordEntry {
            id: state.next_word_id,
            text: text.to_string(),
            translation: req.translation,
            language: req.language,
            part_of_speech: req.part_of_speech,
            category: req.category,
            context: req.context,
            date_added: Utc::now(),
        };
        state.words.insert(entry.id, entry.clone());
        Ok(InsertOutcome::Created(entry))
    }

    async fn set_category(&self, id: i64, category: Category) -> Result<WordEntry> {
        let mut state = self.state();
        let word = state.word_mut(id)?;
        word.category = category;
        Ok(word.clone())
    }

    async fn set_context(&self, id: i64, context: Option<&str>) -> Result<WordEntry> {
        let mut state = self.state();
        let word = state.word_mut(id)?;
        word.context = context.map(str::to_string);
        Ok(word.clone())
    }

    async fn toggle_category(&self, id: i64) -> Result<Category> {
        let mut state = self.state();
        let word = state.word_mut(id)?;
        word.category = word.category.toggled();
        Ok(word.category)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut state = self.state();
        if state.words.remove(&id).is_none() {
            return Ok(false);
        }
        for sheet in state.cheatsheets.values_mut() {
            sheet.word_ids.retain(|w| *w != id);
        }
        Ok(true)
    }

    async fn list(&self, req: &ListWordsRequest) -> Result<ListWordsResponse> {
        req.validate()?;

        let state = self.state();
        let mut matching: Vec<&WordEntry> = state
            .words
            .values()
            .filter(|w| req.category.category().map_or(true, |c| w.category == c))
            .filter(|w| req.part_of_speech.matches(w.part_of_speech))
            .collect();

        match req.sort {
            WordSort::DateDesc => {
                matching.sort_by(|a, b| (b.date_added, b.id).cmp(&(a.date_added, a.id)))
            }
            WordSort::DateAsc => {
                matching.sort_by(|a, b| (a.date_added, a.id).cmp(&(b.date_added, b.id)))
            }
            WordSort::AlphaAsc => matching.sort_by(|a, b| {
                (word_key(&a.text), a.id).cmp(&(word_key(&b.text), b.id))
            }),
            WordSort::AlphaDesc => matching.sort_by(|a, b| {
                (word_key(&b.text), b.id).cmp(&(word_key(&a.text), a.id))
            }),
        }

        let total = matching.len() as i64;
        let words = matching
            .into_iter()
            .skip(usize::try_from(req.offset()).unwrap_or(usize::MAX))
            .take(req.limit as usize)
            .cloned()
            .collect();

        Ok(ListWordsResponse {
            words,
            total,
            page: req.page,
            limit: req.limit,
        })
    }

    async fn recent(&self, limit: i64) -> Result<Vec<WordEntry>> {
        let state = self.state();
        let mut words: Vec<&WordEntry> = state.words.values().collect();
        words.sort_by(|a, b| (b.date_added, b.id).cmp(&(a.date_added, a.id)));
        Ok(words
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn part_of_speech_counts(&self) -> Result<Vec<PartOfSpeechCount>> {
        let mut counts = BTreeMap::new();
        for word in self.state().words.values() {
            *counts.entry(word.part_of_speech).or_insert(0i64) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(part_of_speech, count)| PartOfSpeechCount {
                part_of_speech,
                count,
            })
            .collect())
    }

    async fn category_counts(&self, cutoff: Option<DateTime<Utc>>) -> Result<CategoryCounts> {
        let mut counts = CategoryCounts::default();
        for word in self.state().words.values() {
            if cutoff.is_some_and(|c| word.date_added >= c) {
                continue;
            }
            match word.category {
                Category::Known => counts.known += 1,
                Category::Learning => counts.learning += 1,
            }
        }
        Ok(counts)
    }

    async fn count_added_since(&self, since: DateTime<Utc>) -> Result<i64> {
        Ok(self
            .state()
            .words
            .values()
            .filter(|w| w.date_added >= since)
            .count() as i64)
    }

    async fn known_texts(&self) -> Result<Vec<String>> {
        Ok(self
            .state()
            .words
            .values()
            .filter(|w| w.category == Category::Known)
            .map(|w| w.text.clone())
            .collect())
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn get(&self) -> Result<Settings> {
        Ok(self.state().settings.get_or_insert_with(Settings::default).clone())
    }

    async fn update(&self, req: UpdateSettingsRequest) -> Result<Settings> {
        let req = req.normalized()?;
        let mut state = self.state();
        let settings = state.settings.get_or_insert_with(Settings::default);
        req.apply_to(settings);
        Ok(settings.clone())
    }
}

#[async_trait]
impl PageVisitRepository for MemoryStore {
    async fn record(&self, url: &str, title: Option<&str>) -> Result<()> {
        let mut state = self.state();
        if state.fail_page_visits {
            return Err(Error::Internal("page visit log unavailable".into()));
        }
        state
            .page_visits
            .push((url.to_string(), title.map(str::to_string)));
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.state().page_visits.len() as i64)
    }
}

#[async_trait]
impl CheatsheetRepository for MemoryStore {
    async fn create(&self, req: CreateCheatsheetRequest) -> Result<CheatsheetSummary> {
        let req = req.normalized()?;
        let mut state = self.state();

        if let Some(missing) = req.word_ids.iter().find(|id| !state.words.contains_key(*id)) {
            return Err(Error::InvalidInput(format!(
                "Word {} does not exist",
                missing
            )));
        }

        state.next_cheatsheet_id += 1;
        let id = state.next_cheatsheet_id;
        let sheet = StoredCheatsheet {
            title: req.title,
            date_created: Utc::now(),
            word_ids: req.word_ids,
        };
        let summary = CheatsheetSummary {
            id,
            title: sheet.title.clone(),
            date_created: sheet.date_created,
            word_count: sheet.word_ids.len() as i64,
        };
        state.cheatsheets.insert(id, sheet);
        Ok(summary)
    }

    async fn list(&self) -> Result<Vec<CheatsheetSummary>> {
        let state = self.state();
        let mut summaries: Vec<CheatsheetSummary> = state
            .cheatsheets
            .iter()
            .map(|(id, sheet)| CheatsheetSummary {
                id: *id,
                title: sheet.title.clone(),
                date_created: sheet.date_created,
                word_count: sheet.word_ids.len() as i64,
            })
            .collect();
        summaries.sort_by(|a, b| (b.date_created, b.id).cmp(&(a.date_created, a.id)));
        Ok(summaries)
    }

    async fn get(&self, id: i64) -> Result<Option<Cheatsheet>> {
        let state = self.state();
        let Some(sheet) = state.cheatsheets.get(&id) else {
            return Ok(None);
        };

        let mut words: Vec<WordEntry> = sheet
            .word_ids
            .iter()
            .filter_map(|w| state.words.get(w).cloned())
            .collect();
        // Same order as the SQL: label text ascending, unlabelled last.
        words.sort_by(|a, b| {
            let pos_a = a.part_of_speech.map(|p| p.as_str());
            let pos_b = b.part_of_speech.map(|p| p.as_str());
            (pos_a.is_none(), pos_a, word_key(&a.text), a.id).cmp(&(
                pos_b.is_none(),
                pos_b,
                word_key(&b.text),
                b.id,
            ))
        });

        Ok(Some(Cheatsheet {
            id,
            title: sheet.title.clone(),
            date_created: sheet.date_created,
            words,
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.state().cheatsheets.remove(&id).is_some())
    }
}
