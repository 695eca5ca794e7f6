//! Domain models for vocabulary entries, settings, statistics and cheatsheets.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::defaults;
use crate::error::{Error, Result};

// =============================================================================
// WORD TEXT
// =============================================================================

/// Trim a raw observed word, returning `None` when nothing is left.
pub fn normalize_word(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Case-folded key under which a word is unique in the store.
///
/// Stored in the `text_key` column, which carries the unique index in the
/// Postgres store; folding is Unicode-aware regardless of database locale.
pub fn word_key(text: &str) -> String {
    text.trim().to_lowercase()
}

// =============================================================================
// CATEGORY / PART OF SPEECH
// =============================================================================

/// Learner-facing state of an entry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Category {
    #[default]
    Learning,
    Known,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Learning => "Learning",
            Category::Known => "Known",
        }
    }

    /// The other state; used by the toggle operation.
    pub fn toggled(self) -> Self {
        match self {
            Category::Learning => Category::Known,
            Category::Known => Category::Learning,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "learning" => Ok(Category::Learning),
            "known" => Ok(Category::Known),
            other => Err(Error::InvalidInput(format!("Unknown category '{}'", other))),
        }
    }
}

/// Closed set of part-of-speech labels the classifier can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "Noun",
            PartOfSpeech::Verb => "Verb",
            PartOfSpeech::Adjective => "Adjective",
            PartOfSpeech::Adverb => "Adverb",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PartOfSpeech::ALL
            .into_iter()
            .find(|pos| pos.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown part of speech '{}'", wanted)))
    }
}

// =============================================================================
// WORD ENTRY
// =============================================================================

/// One vocabulary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WordEntry {
    pub id: i64,
    /// Surface form as first observed (trimmed, original casing).
    pub text: String,
    pub translation: Option<String>,
    /// Target-language code in effect when the entry was created.
    pub language: String,
    pub part_of_speech: Option<PartOfSpeech>,
    pub category: Category,
    pub context: Option<String>,
    pub date_added: DateTime<Utc>,
}

/// Request for creating a word entry.
#[derive(Debug, Clone)]
pub struct CreateWordRequest {
    pub text: String,
    pub translation: Option<String>,
    pub language: String,
    pub part_of_speech: Option<PartOfSpeech>,
    pub category: Category,
    pub context: Option<String>,
}

/// Result of an insert-if-absent.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// This call created the row.
    Created(WordEntry),
    /// A row with the same case-folded text already existed (possibly written
    /// by a concurrent caller between lookup and insert).
    Existing(WordEntry),
}

impl InsertOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, InsertOutcome::Created(_))
    }

    pub fn entry(&self) -> &WordEntry {
        match self {
            InsertOutcome::Created(w) | InsertOutcome::Existing(w) => w,
        }
    }

    pub fn into_entry(self) -> WordEntry {
        match self {
            InsertOutcome::Created(w) | InsertOutcome::Existing(w) => w,
        }
    }
}

// =============================================================================
// LISTING
// =============================================================================

/// Category filter for the word list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse the `filter` query value. Unrecognized values mean "all".
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("known") => CategoryFilter::Only(Category::Known),
            Some("learning") => CategoryFilter::Only(Category::Learning),
            _ => CategoryFilter::All,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(*c),
        }
    }
}

/// Part-of-speech filter for the word list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartOfSpeechFilter {
    #[default]
    All,
    Label(PartOfSpeech),
    /// Entries without a part of speech (the breakdown's "Other" bucket).
    Unclassified,
}

impl PartOfSpeechFilter {
    /// Parse the `category` query value.
    pub fn parse(value: Option<&str>) -> Result<Self> {
        let value = match value.map(str::trim) {
            None | Some("") => return Ok(PartOfSpeechFilter::All),
            Some(v) => v,
        };
        if value.eq_ignore_ascii_case("all") {
            Ok(PartOfSpeechFilter::All)
        } else if value.eq_ignore_ascii_case(defaults::OTHER_CATEGORY) {
            Ok(PartOfSpeechFilter::Unclassified)
        } else {
            value.parse().map(PartOfSpeechFilter::Label)
        }
    }

    pub fn matches(&self, pos: Option<PartOfSpeech>) -> bool {
        match self {
            PartOfSpeechFilter::All => true,
            PartOfSpeechFilter::Label(label) => pos == Some(*label),
            PartOfSpeechFilter::Unclassified => pos.is_none(),
        }
    }
}

/// Sort order for the word list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WordSort {
    #[default]
    DateDesc,
    DateAsc,
    AlphaAsc,
    AlphaDesc,
}

impl WordSort {
    /// Parse the `sort` query value. Unrecognized values fall back to newest first.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("date-asc") => WordSort::DateAsc,
            Some("alpha-asc") => WordSort::AlphaAsc,
            Some("alpha-desc") => WordSort::AlphaDesc,
            _ => WordSort::DateDesc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WordSort::DateDesc => "date-desc",
            WordSort::DateAsc => "date-asc",
            WordSort::AlphaAsc => "alpha-asc",
            WordSort::AlphaDesc => "alpha-desc",
        }
    }
}

/// Request for listing words.
#[derive(Debug, Clone)]
pub struct ListWordsRequest {
    /// 1-based page number
    pub page: i64,
    pub limit: i64,
    pub category: CategoryFilter,
    pub part_of_speech: PartOfSpeechFilter,
    pub sort: WordSort,
}

impl Default for ListWordsRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: defaults::PAGE_LIMIT,
            category: CategoryFilter::All,
            part_of_speech: PartOfSpeechFilter::All,
            sort: WordSort::DateDesc,
        }
    }
}

impl ListWordsRequest {
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(Error::InvalidInput("page must be >= 1".into()));
        }
        if self.limit < 1 || self.limit > defaults::PAGE_LIMIT_MAX {
            return Err(Error::InvalidInput(format!(
                "limit must be between 1 and {}",
                defaults::PAGE_LIMIT_MAX
            )));
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of words.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListWordsResponse {
    pub words: Vec<WordEntry>,
    /// Number of entries matching the filters across all pages
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// =============================================================================
// SETTINGS
// =============================================================================

/// The singleton settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Settings {
    pub target_language: String,
    pub min_word_length: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_language: defaults::TARGET_LANGUAGE.to_string(),
            min_word_length: defaults::MIN_WORD_LENGTH,
        }
    }
}

impl Settings {
    /// The caller's language if one was given, else the configured target.
    pub fn effective_language(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.target_language.as_str())
            .to_string()
    }
}

/// Partial update of the settings record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub target_language: Option<String>,
    pub min_word_length: Option<i32>,
}

impl UpdateSettingsRequest {
    /// Validate and trim; rejects blank languages and out-of-range lengths.
    pub fn normalized(self) -> Result<Self> {
        let target_language = match self.target_language {
            Some(lang) => {
                let lang = lang.trim();
                if lang.is_empty() {
                    return Err(Error::InvalidInput("Language is required".into()));
                }
                Some(lang.to_string())
            }
            None => None,
        };
        if let Some(len) = self.min_word_length {
            if !(defaults::MIN_WORD_LENGTH_LOWER..=defaults::MIN_WORD_LENGTH_UPPER).contains(&len)
            {
                return Err(Error::InvalidInput(format!(
                    "min_word_length must be between {} and {}",
                    defaults::MIN_WORD_LENGTH_LOWER,
                    defaults::MIN_WORD_LENGTH_UPPER
                )));
            }
        }
        Ok(Self {
            target_language,
            min_word_length: self.min_word_length,
        })
    }

    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(lang) = &self.target_language {
            settings.target_language = lang.clone();
        }
        if let Some(len) = self.min_word_length {
            settings.min_word_length = len;
        }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Entry counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub known: i64,
    pub learning: i64,
}

/// Raw per-label count as produced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartOfSpeechCount {
    pub part_of_speech: Option<PartOfSpeech>,
    pub count: i64,
}

/// Part-of-speech label → entry count, always carrying the "Other" bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryBreakdown(pub BTreeMap<String, i64>);

impl CategoryBreakdown {
    pub fn from_counts(counts: impl IntoIterator<Item = PartOfSpeechCount>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(defaults::OTHER_CATEGORY.to_string(), 0);
        for c in counts {
            let label = c
                .part_of_speech
                .map(|p| p.as_str())
                .unwrap_or(defaults::OTHER_CATEGORY);
            *map.entry(label.to_string()).or_insert(0) += c.count;
        }
        Self(map)
    }

    pub fn get(&self, label: &str) -> Option<i64> {
        self.0.get(label).copied()
    }
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub known_words: i64,
    pub learning_words: i64,
    /// Entries added since local midnight
    pub today_words: i64,
    pub pages_visited: i64,
}

/// Cumulative-as-of series over trailing calendar days, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProgressSeries {
    /// `YYYY-MM-DD` local dates
    pub labels: Vec<String>,
    pub known: Vec<i64>,
    pub learning: Vec<i64>,
}

// =============================================================================
// CHEATSHEETS
// =============================================================================

/// Request for creating a cheatsheet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheatsheetRequest {
    pub title: String,
    pub word_ids: Vec<i64>,
}

impl CreateCheatsheetRequest {
    /// Trim the title and collapse duplicate ids, keeping first-seen order.
    pub fn normalized(self) -> Result<Self> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("Title is required".into()));
        }
        if self.word_ids.is_empty() {
            return Err(Error::InvalidInput("Word IDs are required".into()));
        }
        let mut seen = std::collections::HashSet::new();
        let word_ids = self
            .word_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        Ok(Self {
            title: title.to_string(),
            word_ids,
        })
    }
}

/// Cheatsheet listing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheatsheetSummary {
    pub id: i64,
    pub title: String,
    pub date_created: DateTime<Utc>,
    pub word_count: i64,
}

/// Cheatsheet with its member words embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cheatsheet {
    pub id: i64,
    pub title: String,
    pub date_created: DateTime<Utc>,
    pub words: Vec<WordEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_word_skips_blank() {
        assert_eq!(normalize_word(""), None);
        assert_eq!(normalize_word("   "), None);
        assert_eq!(normalize_word("\t\n"), None);
        assert_eq!(normalize_word("  Cat "), Some("Cat"));
    }

    #[test]
    fn test_word_key_folds_case() {
        assert_eq!(word_key("Hello"), word_key("hELLO"));
        assert_eq!(word_key(" Árbol "), "árbol");
    }

    #[test]
    fn test_category_toggle_round_trip() {
        assert_eq!(Category::Learning.toggled(), Category::Known);
        assert_eq!(Category::Learning.toggled().toggled(), Category::Learning);
    }

    #[test]
    fn test_category_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&Category::Known).unwrap(), "\"Known\"");
        assert_eq!("learning".parse::<Category>().unwrap(), Category::Learning);
        assert!("mastered".parse::<Category>().is_err());
    }

    #[test]
    fn test_part_of_speech_parse_case_insensitive() {
        assert_eq!("noun".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Noun);
        assert_eq!("ADVERB".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Adverb);
        assert!("Expression".parse::<PartOfSpeech>().is_err());
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("all")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(Some("known")),
            CategoryFilter::Only(Category::Known)
        );
        assert_eq!(
            CategoryFilter::parse(Some("Learning")),
            CategoryFilter::Only(Category::Learning)
        );
        assert_eq!(CategoryFilter::parse(Some("bogus")), CategoryFilter::All);
    }

    #[test]
    fn test_part_of_speech_filter_parse() {
        assert_eq!(PartOfSpeechFilter::parse(None).unwrap(), PartOfSpeechFilter::All);
        assert_eq!(
            PartOfSpeechFilter::parse(Some("all")).unwrap(),
            PartOfSpeechFilter::All
        );
        assert_eq!(
            PartOfSpeechFilter::parse(Some("Verb")).unwrap(),
            PartOfSpeechFilter::Label(PartOfSpeech::Verb)
        );
        assert_eq!(
            PartOfSpeechFilter::parse(Some("Other")).unwrap(),
            PartOfSpeechFilter::Unclassified
        );
        assert!(PartOfSpeechFilter::parse(Some("Gerund")).is_err());
    }

    #[test]
    fn test_part_of_speech_filter_matches() {
        assert!(PartOfSpeechFilter::All.matches(None));
        assert!(PartOfSpeechFilter::Unclassified.matches(None));
        assert!(!PartOfSpeechFilter::Unclassified.matches(Some(PartOfSpeech::Noun)));
        assert!(PartOfSpeechFilter::Label(PartOfSpeech::Noun).matches(Some(PartOfSpeech::Noun)));
        assert!(!PartOfSpeechFilter::Label(PartOfSpeech::Noun).matches(None));
    }

    #[test]
    fn test_word_sort_parse_defaults_to_newest_first() {
        assert_eq!(WordSort::parse(None), WordSort::DateDesc);
        assert_eq!(WordSort::parse(Some("alpha-asc")), WordSort::AlphaAsc);
        assert_eq!(WordSort::parse(Some("alpha-desc")), WordSort::AlphaDesc);
        assert_eq!(WordSort::parse(Some("date-asc")), WordSort::DateAsc);
        assert_eq!(WordSort::parse(Some("random")), WordSort::DateDesc);
    }

    #[test]
    fn test_list_request_offset_and_validation() {
        let req = ListWordsRequest {
            page: 3,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(req.offset(), 20);
        assert!(req.validate().is_ok());

        let bad_page = ListWordsRequest {
            page: 0,
            ..Default::default()
        };
        assert!(matches!(bad_page.validate(), Err(Error::InvalidInput(_))));

        let bad_limit = ListWordsRequest {
            limit: 0,
            ..Default::default()
        };
        assert!(bad_limit.validate().is_err());

        let huge_limit = ListWordsRequest {
            limit: defaults::PAGE_LIMIT_MAX + 1,
            ..Default::default()
        };
        assert!(huge_limit.validate().is_err());
    }

    #[test]
    fn test_effective_language() {
        let settings = Settings::default();
        assert_eq!(settings.effective_language(None), "es");
        assert_eq!(settings.effective_language(Some("  ")), "es");
        assert_eq!(settings.effective_language(Some("fr")), "fr");
    }

    #[test]
    fn test_update_settings_validation() {
        let ok = UpdateSettingsRequest {
            target_language: Some(" de ".into()),
            min_word_length: Some(4),
        }
        .normalized()
        .unwrap();
        assert_eq!(ok.target_language.as_deref(), Some("de"));

        let mut settings = Settings::default();
        ok.apply_to(&mut settings);
        assert_eq!(settings.target_language, "de");
        assert_eq!(settings.min_word_length, 4);

        assert!(UpdateSettingsRequest {
            target_language: Some("".into()),
            min_word_length: None,
        }
        .normalized()
        .is_err());
        assert!(UpdateSettingsRequest {
            target_language: None,
            min_word_length: Some(11),
        }
        .normalized()
        .is_err());
    }

    #[test]
    fn test_breakdown_always_has_other() {
        let empty = CategoryBreakdown::from_counts(vec![]);
        assert_eq!(empty.get("Other"), Some(0));

        let breakdown = CategoryBreakdown::from_counts(vec![
            PartOfSpeechCount {
                part_of_speech: Some(PartOfSpeech::Noun),
                count: 4,
            },
            PartOfSpeechCount {
                part_of_speech: None,
                count: 2,
            },
        ]);
        assert_eq!(breakdown.get("Noun"), Some(4));
        assert_eq!(breakdown.get("Other"), Some(2));
        assert_eq!(breakdown.get("Verb"), None);

        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["Noun"], 4);
        assert_eq!(json["Other"], 2);
    }

    #[test]
    fn test_user_stats_wire_names() {
        let stats = UserStats {
            known_words: 1,
            learning_words: 2,
            today_words: 3,
            pages_visited: 4,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["knownWords"], 1);
        assert_eq!(json["learningWords"], 2);
        assert_eq!(json["todayWords"], 3);
        assert_eq!(json["pagesVisited"], 4);
    }

    #[test]
    fn test_cheatsheet_request_dedupes_ids() {
        let req = CreateCheatsheetRequest {
            title: "  Week 1 ".into(),
            word_ids: vec![3, 1, 3, 2, 1],
        }
        .normalized()
        .unwrap();
        assert_eq!(req.title, "Week 1");
        assert_eq!(req.word_ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_cheatsheet_request_requires_title_and_ids() {
        assert!(CreateCheatsheetRequest {
            title: " ".into(),
            word_ids: vec![1],
        }
        .normalized()
        .is_err());
        assert!(CreateCheatsheetRequest {
            title: "Verbs".into(),
            word_ids: vec![],
        }
        .normalized()
        .is_err());
    }
}
