//! Word repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;

use vocab_core::{
    word_key, Category, CategoryCounts, CreateWordRequest, Error, InsertOutcome,
    ListWordsRequest, ListWordsResponse, PartOfSpeech, PartOfSpeechCount, PartOfSpeechFilter,
    Result, WordEntry, WordRepository, WordSort,
};

pub(crate) const WORD_COLUMNS: &str =
    "id, text, translation, language, part_of_speech, category, context, date_added";

/// Map a `word` row to a [`WordEntry`].
pub(crate) fn word_from_row(row: &PgRow) -> Result<WordEntry> {
    let category: String = row.get("category");
    let part_of_speech: Option<String> = row.get("part_of_speech");
    Ok(WordEntry {
        id: row.get("id"),
        text: row.get("text"),
        translation: row.get("translation"),
        language: row.get("language"),
        part_of_speech: part_of_speech
            .as_deref()
            .map(str::parse::<PartOfSpeech>)
            .transpose()?,
        category: category.parse()?,
        context: row.get("context"),
        date_added: row.get("date_added"),
    })
}

fn order_clause(sort: WordSort) -> &'static str {
    match sort {
        WordSort::DateDesc => "date_added DESC, id DESC",
        WordSort::DateAsc => "date_added ASC, id ASC",
        WordSort::AlphaAsc => "text_key ASC, id ASC",
        WordSort::AlphaDesc => "text_key DESC, id DESC",
    }
}

/// PostgreSQL implementation of WordRepository.
pub struct PgWordRepository {
    pool: Pool<Postgres>,
}

impl PgWordRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WordRepository for PgWordRepository {
    async fn find_by_text(&self, text: &str) -> Result<Option<WordEntry>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM word WHERE text_key = $1",
            WORD_COLUMNS
        ))
        .bind(word_key(text))
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(word_from_row).transpose()
    }

    async fn get(&self, id: i64) -> Result<Option<WordEntry>> {
        let row = sqlx::query(&format!("SELECT {} FROM word WHERE id = $1", WORD_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.as_ref().map(word_from_row).transpose()
    }

    async fn insert_if_absent(&self, req: CreateWordRequest) -> Result<InsertOutcome> {
        let text = req.text.trim();
        if text.is_empty() {
            return Err(Error::InvalidInput("Word is required".into()));
        }

        let inserted = sqlx::query(&format!(
            r#"
            INSERT INTO word (text, text_key, translation, language, part_of_speech, category, context)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (text_key) DO NOTHING
            RETURNING {}
            "#,
            WORD_COLUMNS
        ))
        .bind(text)
        .bind(word_key(text))
        .bind(&req.translation)
        .bind(&req.language)
        .bind(req.part_of_speech.map(|p| p.as_str()))
        .bind(req.category.as_str())
        .bind(&req.context)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        if let Some(row) = inserted {
            return Ok(InsertOutcome::Created(word_from_row(&row)?));
        }

        // Lost the race (or the word was already stored): report the winner.
        debug!(
            subsystem = "database",
            component = "words",
            op = "insert_if_absent",
            word = text,
            "Word already present"
        );
        match self.find_by_text(text).await? {
            Some(existing) => Ok(InsertOutcome::Existing(existing)),
            None => Err(Error::Conflict(format!(
                "Word '{}' was removed while being inserted",
                text
            ))),
        }
    }

    async fn set_category(&self, id: i64, category: Category) -> Result<WordEntry> {
        let row = sqlx::query(&format!(
            "UPDATE word SET category = $2 WHERE id = $1 RETURNING {}",
            WORD_COLUMNS
        ))
        .bind(id)
        .bind(category.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        match row {
            Some(row) => word_from_row(&row),
            None => Err(Error::WordNotFound(id)),
        }
    }

    async fn set_context(&self, id: i64, context: Option<&str>) -> Result<WordEntry> {
        let row = sqlx::query(&format!(
            "UPDATE word SET context = $2 WHERE id = $1 RETURNING {}",
            WORD_COLUMNS
        ))
        .bind(id)
        .bind(context)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        match row {
            Some(row) => word_from_row(&row),
            None => Err(Error::WordNotFound(id)),
        }
    }

    async fn toggle_category(&self, id: i64) -> Result<Category> {
        let row = sqlx::query(
            r#"
            UPDATE word
            SET category = CASE category WHEN 'Known' THEN 'Learning' ELSE 'Known' END
            WHERE id = $1
            RETURNING category
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        match row {
            Some(row) => row.get::<String, _>("category").parse(),
            None => Err(Error::WordNotFound(id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM word WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, req: &ListWordsRequest) -> Result<ListWordsResponse> {
        req.validate()?;

        // Build dynamic WHERE clause; every filter value is text.
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<&'static str> = Vec::new();
        let mut param_idx = 1;

        if let Some(category) = req.category.category() {
            conditions.push(format!("category = ${}", param_idx));
            params.push(category.as_str());
            param_idx += 1;
        }

        match req.part_of_speech {
            PartOfSpeechFilter::All => {}
            PartOfSpeechFilter::Label(pos) => {
                conditions.push(format!("part_of_speech = ${}", param_idx));
                params.push(pos.as_str());
                param_idx += 1;
            }
            PartOfSpeechFilter::Unclassified => conditions.push("part_of_speech IS NULL".into()),
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) AS total FROM word {}", where_clause);
        let mut count_query = sqlx::query(&count_sql);
        for p in &params {
            count_query = count_query.bind(*p);
        }
        let total: i64 = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?
            .get("total");

        let page_sql = format!(
            "SELECT {} FROM word {} ORDER BY {} LIMIT ${} OFFSET ${}",
            WORD_COLUMNS,
            where_clause,
            order_clause(req.sort),
            param_idx,
            param_idx + 1
        );
        let mut page_query = sqlx::query(&page_sql);
        for p in &params {
            page_query = page_query.bind(*p);
        }
        let rows = page_query
            .bind(req.limit)
            .bind(req.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let words = rows.iter().map(word_from_row).collect::<Result<Vec<_>>>()?;

        Ok(ListWordsResponse {
            words,
            total,
            page: req.page,
            limit: req.limit,
        })
    }

    async fn recent(&self, limit: i64) -> Result<Vec<WordEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM word ORDER BY date_added DESC, id DESC LIMIT $1",
            WORD_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(word_from_row).collect()
    }

    async fn part_of_speech_counts(&self) -> Result<Vec<PartOfSpeechCount>> {
        let rows = sqlx::query(
            "SELECT part_of_speech, COUNT(*) AS count FROM word GROUP BY part_of_speech",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter()
            .map(|r| -> Result<PartOfSpeechCount> {
                let label: Option<String> = r.get("part_of_speech");
                Ok(PartOfSpeechCount {
                    part_of_speech: label
                        .as_deref()
                        .map(str::parse::<PartOfSpeech>)
                        .transpose()?,
                    count: r.get("count"),
                })
            })
            .collect()
    }

    async fn category_counts(&self, cutoff: Option<DateTime<Utc>>) -> Result<CategoryCounts> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE category = 'Known') AS known,
                COUNT(*) FILTER (WHERE category = 'Learning') AS learning
            FROM word
            WHERE $1::timestamptz IS NULL OR date_added < $1
            "#,
        )
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(CategoryCounts {
            known: row.get("known"),
            learning: row.get("learning"),
        })
    }

    async fn count_added_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM word WHERE date_added >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.get("count"))
    }

    async fn known_texts(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT text FROM word WHERE category = 'Known' ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.iter().map(|r| r.get("text")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_breaks_ties_by_id() {
        assert!(order_clause(WordSort::DateDesc).ends_with("id DESC"));
        assert!(order_clause(WordSort::AlphaAsc).starts_with("text_key ASC"));
        assert!(order_clause(WordSort::AlphaDesc).ends_with("id DESC"));
    }
}
