//! Dashboard statistics over the vocabulary store.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use vocab_core::{
    calendar, defaults, CategoryBreakdown, Error, PageVisitRepository, ProgressSeries, Result,
    UserStats, WordRepository,
};

/// Read-only statistics service.
///
/// Calendar days are interpreted in the time zone passed to each call; the
/// HTTP layer passes `chrono::Local`.
#[derive(Clone)]
pub struct StatsService {
    words: Arc<dyn WordRepository>,
    page_visits: Arc<dyn PageVisitRepository>,
}

impl StatsService {
    pub fn new(words: Arc<dyn WordRepository>, page_visits: Arc<dyn PageVisitRepository>) -> Self {
        Self { words, page_visits }
    }

    /// Headline counts; `today_words` counts entries added since local midnight.
    pub async fn stats<Tz>(&self, tz: &Tz, now: DateTime<Utc>) -> Result<UserStats>
    where
        Tz: TimeZone + Sync,
    {
        let midnight = calendar::day_start(tz, now.with_timezone(tz).date_naive());

        let counts = self.words.category_counts(None).await?;
        let today_words = self.words.count_added_since(midnight).await?;
        let pages_visited = self.page_visits.count().await?;

        Ok(UserStats {
            known_words: counts.known,
            learning_words: counts.learning,
            today_words,
            pages_visited,
        })
    }

    /// Cumulative Known/Learning counts as of the end of each of the trailing
    /// `days` calendar days, oldest first.
    ///
    /// Entries are counted by their current category.
    pub async fn progress<Tz>(&self, tz: &Tz, now: DateTime<Utc>, days: u32) -> Result<ProgressSeries>
    where
        Tz: TimeZone + Sync,
    {
        if !(1..=defaults::PROGRESS_DAYS_MAX).contains(&days) {
            return Err(Error::InvalidInput(format!(
                "days must be between 1 and {}",
                defaults::PROGRESS_DAYS_MAX
            )));
        }

        let today = now.with_timezone(tz).date_naive();
        let boundaries: Vec<_> = calendar::trailing_days(today, days)
            .into_iter()
            .map(|day| (calendar::day_label(day), calendar::day_end_exclusive(tz, day)))
            .collect();

        let mut series = ProgressSeries::default();
        for (label, cutoff) in boundaries {
            let counts = self.words.category_counts(Some(cutoff)).await?;
            series.labels.push(label);
            series.known.push(counts.known);
            series.learning.push(counts.learning);
        }
        Ok(series)
    }

    /// Part-of-speech label counts, always including `"Other"`.
    pub async fn category_breakdown(&self) -> Result<CategoryBreakdown> {
        let counts = self.words.part_of_speech_counts().await?;
        Ok(CategoryBreakdown::from_counts(counts))
    }
}
