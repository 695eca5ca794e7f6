//! Intake pipeline: reconciles observed words against the vocabulary store.
//!
//! Every creation path goes through [`WordRepository::insert_if_absent`], so
//! two concurrent callers carrying the same unseen word see exactly one
//! `Created` between them; the other reports the word as already known.
//!
//! Settings are read once per request by the caller and passed in.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use vocab_core::{
    normalize_word, placeholder_translation, Category, CreateWordRequest, Error, InsertOutcome,
    PageVisitRepository, PartOfSpeechClassifier, Result, Settings, Translator, WordEntry,
    WordRepository,
};

/// Page the batch was scanned from.
#[derive(Debug, Clone, Default)]
pub struct PageRef {
    pub url: String,
    pub title: Option<String>,
}

/// Result of [`IntakePipeline::process_batch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Stored text of every word already recorded, in input order.
    pub known_words: Vec<String>,
    /// Entries created by this batch, in input order.
    pub new_words: Vec<WordEntry>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.known_words.len() + self.new_words.len()
    }
}

/// Result of a standalone translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub word: String,
    pub translation: String,
    pub language: String,
}

/// Word intake service.
#[derive(Clone)]
pub struct IntakePipeline {
    words: Arc<dyn WordRepository>,
    page_visits: Arc<dyn PageVisitRepository>,
    translator: Arc<dyn Translator>,
    classifier: Arc<dyn PartOfSpeechClassifier>,
    translate_timeout: Duration,
}

impl IntakePipeline {
    pub fn new(
        words: Arc<dyn WordRepository>,
        page_visits: Arc<dyn PageVisitRepository>,
        translator: Arc<dyn Translator>,
        classifier: Arc<dyn PartOfSpeechClassifier>,
        translate_timeout: Duration,
    ) -> Self {
        Self {
            words,
            page_visits,
            translator,
            classifier,
            translate_timeout,
        }
    }

    /// Reconcile a batch of raw words.
    ///
    /// Blank words are skipped. A word found case-insensitively is reported
    /// in `known_words` whatever its category; anything else is translated,
    /// classified and stored as Learning.
    pub async fn process_batch(
        &self,
        settings: &Settings,
        words: &[String],
        language: Option<&str>,
        page: Option<PageRef>,
    ) -> Result<BatchOutcome> {
        let start = Instant::now();
        let language = settings.effective_language(language);

        if let Some(page) = page.filter(|p| !p.url.trim().is_empty()) {
            self.record_visit(&page).await;
        }

        let mut outcome = BatchOutcome::default();
        for raw in words {
            let Some(word) = normalize_word(raw) else {
                continue;
            };

            if let Some(existing) = self.words.find_by_text(word).await? {
                outcome.known_words.push(existing.text);
                continue;
            }

            let req = self.build_entry(word, &language, Category::Learning, None, None).await;
            match self.words.insert_if_absent(req).await? {
                InsertOutcome::Created(entry) => outcome.new_words.push(entry),
                InsertOutcome::Existing(entry) => outcome.known_words.push(entry.text),
            }
        }

        info!(
            subsystem = "intake",
            op = "process_batch",
            language = %language,
            input = words.len(),
            known = outcome.known_words.len(),
            created = outcome.new_words.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch processed"
        );
        Ok(outcome)
    }

    /// Record `word` as Known, creating it if needed. Idempotent.
    pub async fn mark_known(&self, settings: &Settings, word: &str) -> Result<WordEntry> {
        let word = require_word(word)?;

        let entry = match self.words.find_by_text(word).await? {
            Some(existing) => existing,
            None => {
                let req = self
                    .build_entry(word, &settings.target_language, Category::Known, None, None)
                    .await;
                match self.words.insert_if_absent(req).await? {
                    InsertOutcome::Created(entry) => return Ok(entry),
                    InsertOutcome::Existing(entry) => entry,
                }
            }
        };

        if entry.category == Category::Known {
            Ok(entry)
        } else {
            self.words.set_category(entry.id, Category::Known).await
        }
    }

    /// Queue `word` for review.
    ///
    /// An existing entry keeps its category; its context is overwritten only
    /// when `context` is given (an empty string counts). A new entry is
    /// Learning, with the supplied translation or the translator's.
    pub async fn add_for_review(
        &self,
        settings: &Settings,
        word: &str,
        translation: Option<String>,
        context: Option<String>,
    ) -> Result<WordEntry> {
        let word = require_word(word)?;

        let existing = match self.words.find_by_text(word).await? {
            Some(existing) => existing,
            None => {
                let translation = translation.filter(|t| !t.trim().is_empty());
                let req = self
                    .build_entry(
                        word,
                        &settings.target_language,
                        Category::Learning,
                        translation,
                        context.clone(),
                    )
                    .await;
                match self.words.insert_if_absent(req).await? {
                    InsertOutcome::Created(entry) => return Ok(entry),
                    InsertOutcome::Existing(entry) => entry,
                }
            }
        };

        match context {
            Some(ctx) => self.words.set_context(existing.id, Some(&ctx)).await,
            None => Ok(existing),
        }
    }

    /// Flip Known <-> Learning.
    pub async fn toggle_status(&self, id: i64) -> Result<Category> {
        let category = self.words.toggle_category(id).await?;
        debug!(
            subsystem = "intake",
            op = "toggle_status",
            word_id = id,
            category = %category,
            "Category toggled"
        );
        Ok(category)
    }

    /// Mirror the client's known-word set into the store.
    ///
    /// Returns the number of input words, blank ones included.
    pub async fn sync_known_words(&self, settings: &Settings, words: &[String]) -> Result<usize> {
        let mut promoted = 0usize;
        let mut created = 0usize;

        for raw in words {
            let Some(word) = normalize_word(raw) else {
                continue;
            };

            let entry = match self.words.find_by_text(word).await? {
                Some(existing) => existing,
                None => {
                    let req = self
                        .build_entry(word, &settings.target_language, Category::Known, None, None)
                        .await;
                    match self.words.insert_if_absent(req).await? {
                        InsertOutcome::Created(_) => {
                            created += 1;
                            continue;
                        }
                        InsertOutcome::Existing(entry) => entry,
                    }
                }
            };

            if entry.category != Category::Known {
                self.words.set_category(entry.id, Category::Known).await?;
                promoted += 1;
            }
        }

        info!(
            subsystem = "intake",
            op = "sync_known_words",
            input = words.len(),
            created,
            promoted,
            "Known words synced"
        );
        Ok(words.len())
    }

    /// Translate a single word without storing it.
    pub async fn translate(
        &self,
        settings: &Settings,
        word: &str,
        language: Option<&str>,
    ) -> Result<Translation> {
        let word = require_word(word)?;
        let language = settings.effective_language(language);
        let translation = self.translate_or_placeholder(word, &language).await;
        Ok(Translation {
            word: word.to_string(),
            translation,
            language,
        })
    }

    async fn build_entry(
        &self,
        word: &str,
        language: &str,
        category: Category,
        translation: Option<String>,
        context: Option<String>,
    ) -> CreateWordRequest {
        let translation = match translation {
            Some(t) => t,
            None => self.translate_or_placeholder(word, language).await,
        };
        CreateWordRequest {
            text: word.to_string(),
            translation: Some(translation),
            language: language.to_string(),
            part_of_speech: self.classifier.classify(word),
            category,
            context,
        }
    }

    /// Bounded translator call; errors and timeouts degrade to the placeholder.
    async fn translate_or_placeholder(&self, word: &str, language: &str) -> String {
        match tokio::time::timeout(
            self.translate_timeout,
            self.translator.translate(word, language),
        )
        .await
        {
            Ok(Ok(translation)) => translation,
            Ok(Err(e)) => {
                warn!(
                    subsystem = "intake",
                    translator = self.translator.name(),
                    word,
                    language,
                    error = %e,
                    "Translator failed, using placeholder"
                );
                placeholder_translation(word, language)
            }
            Err(_) => {
                warn!(
                    subsystem = "intake",
                    translator = self.translator.name(),
                    word,
                    language,
                    timeout_ms = self.translate_timeout.as_millis() as u64,
                    "Translator timed out, using placeholder"
                );
                placeholder_translation(word, language)
            }
        }
    }

    async fn record_visit(&self, page: &PageRef) {
        if let Err(e) = self
            .page_visits
            .record(page.url.trim(), page.title.as_deref())
            .await
        {
            warn!(
                subsystem = "intake",
                op = "record_visit",
                url = %page.url,
                error = %e,
                "Failed to record page visit"
            );
        }
    }
}

fn require_word(raw: &str) -> Result<&str> {
    normalize_word(raw).ok_or_else(|| Error::InvalidInput("Word is required".into()))
}
